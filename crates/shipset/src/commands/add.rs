use std::io::Read as _;
use std::path::Path;

use shipset_engine::operations::{AddInput, AddOperation, AddResult};
use shipset_engine::providers::{FsChangesetStore, FsProjectSource};
use shipset_engine::traits::ProjectSource;

use super::AddArgs;
use crate::environment::is_interactive;
use crate::error::Result;
use crate::interaction::{NonInteractiveProvider, TerminalInteractionProvider};

pub(super) fn run(args: AddArgs, start_path: &Path) -> Result<()> {
    let project_source = FsProjectSource::new();
    let project = project_source.discover(start_path)?;
    let store = FsChangesetStore::new(&project.root);

    let input = build_input(args)?;

    let result = if is_interactive() {
        AddOperation::new(project_source, store, TerminalInteractionProvider::new())
            .execute(start_path, input)?
    } else {
        AddOperation::new(project_source, store, NonInteractiveProvider)
            .execute(start_path, input)?
    };

    match result {
        AddResult::Created { record, source_id } => {
            println!("Created changeset: .changeset/{source_id}");
            println!();
            println!("Bump: {}", record.bump);
            println!("Packages:");
            for package in &record.packages {
                println!("  - {package}");
            }
            println!();
            println!("{}", record.summary);
        }
        AddResult::Cancelled => println!("Cancelled, no changeset written."),
        AddResult::NoPackages => println!("No packages selected, no changeset written."),
    }

    Ok(())
}

fn build_input(args: AddArgs) -> Result<AddInput> {
    let summary = match args.message {
        Some(message) if message == "-" => Some(read_summary_from_stdin()?),
        other => other,
    };

    Ok(AddInput {
        packages: args.packages,
        bump: args.bump,
        summary,
    })
}

fn read_summary_from_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
