mod add;
mod check;
mod release;
mod status;

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use shipset_core::BumpLevel;

use crate::error::Result;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a new changeset
    Add(AddArgs),
    /// Show pending changesets and projected releases
    Status,
    /// Verify the branch carries a changeset for every changed package
    Check(CheckArgs),
    /// Consume pending changesets: bump versions and write changelogs
    Release(ReleaseArgs),
}

#[derive(Args)]
pub(crate) struct AddArgs {
    /// Affected package; repeat for multiple packages
    #[arg(long = "package", short = 'p', value_name = "NAME")]
    pub packages: Vec<String>,

    /// Bump level for the listed packages
    #[arg(long, value_enum)]
    pub bump: Option<BumpLevel>,

    /// Changelog summary; use '-' to read from stdin
    #[arg(long, short)]
    pub message: Option<String>,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Base branch to diff against (default: configured baseBranch)
    #[arg(long)]
    pub base: Option<String>,
}

#[derive(Args)]
pub(crate) struct ReleaseArgs {
    /// Compute and print the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write the combined pull-request description to this file
    #[arg(long, value_name = "FILE")]
    pub pr_description: Option<PathBuf>,
}

impl Commands {
    pub(crate) fn execute(self, start_path: &Path) -> Result<()> {
        match self {
            Self::Add(args) => add::run(args, start_path),
            Self::Status => status::run(start_path),
            Self::Check(args) => check::run(args, start_path),
            Self::Release(args) => release::run(args, start_path),
        }
    }
}
