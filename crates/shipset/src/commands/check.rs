use std::path::Path;

use shipset_engine::operations::{CheckOperation, CheckOutput};
use shipset_engine::providers::{FsChangesetStore, FsProjectSource, GitDiffProvider};
use shipset_engine::traits::ProjectSource;
use shipset_engine::ShipsetConfig;

use super::CheckArgs;
use crate::error::{CliError, Result};

pub(super) fn run(args: CheckArgs, start_path: &Path) -> Result<()> {
    let project_source = FsProjectSource::new();
    let project = project_source.discover(start_path)?;
    let store = FsChangesetStore::new(&project.root);

    let base = match args.base {
        Some(base) => base,
        None => ShipsetConfig::load(store.changeset_dir())?.base_branch,
    };

    let output = CheckOperation::new(project_source, store, GitDiffProvider::new())
        .execute(start_path, &base)?;

    print_check(&output, &base);

    if output.is_success() {
        Ok(())
    } else {
        Err(CliError::CheckFailed)
    }
}

fn print_check(output: &CheckOutput, base: &str) {
    println!("Comparing against '{base}'");

    if !output.new_changesets.is_empty() {
        println!();
        println!("New changesets:");
        for source_id in &output.new_changesets {
            println!("  {source_id}");
        }
    }

    if !output.affected_packages.is_empty() {
        println!();
        println!("Changed packages:");
        for package in &output.affected_packages {
            let marker = if output.covered_packages.contains(&package.name) {
                "covered"
            } else {
                "MISSING CHANGESET"
            };
            println!("  {} ({marker})", package.name);
        }
    }

    if !output.rejected.is_empty() {
        println!();
        println!("Invalid changeset files:");
        for rejected in &output.rejected {
            println!("  {}: {}", rejected.source_id, rejected.reason);
        }
    }

    if !output.deleted_changesets.is_empty() {
        println!();
        println!("Changesets deleted by this branch:");
        for path in &output.deleted_changesets {
            println!("  {}", path.display());
        }
    }

    println!();
    if output.is_success() {
        println!("OK: every changed package has a changeset.");
    } else {
        println!(
            "{} package(s) missing a changeset.",
            output.uncovered_packages.len()
        );
    }
}
