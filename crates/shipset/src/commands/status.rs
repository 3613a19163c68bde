use std::path::Path;

use shipset_engine::operations::{StatusOperation, StatusOutput};
use shipset_engine::providers::{FsChangesetStore, FsProjectSource};
use shipset_engine::traits::ProjectSource;

use crate::error::{CliError, Result};

pub(super) fn run(start_path: &Path) -> Result<()> {
    let project_source = FsProjectSource::new();
    let project = project_source.discover(start_path)?;
    let store = FsChangesetStore::new(&project.root);

    let output = StatusOperation::new(project_source, store).execute(start_path)?;

    print_status(&output);

    if !output.rejected.is_empty() {
        return Err(CliError::ChangesetsRejected {
            count: output.rejected.len(),
        });
    }
    if !output.failures.is_empty() {
        return Err(CliError::ResolutionFailed {
            count: output.failures.len(),
        });
    }

    Ok(())
}

fn print_status(output: &StatusOutput) {
    if output.pending.is_empty() {
        println!("No pending changesets.");
        return;
    }

    println!("Pending changesets: {}", output.pending.len());
    for source_id in &output.pending {
        println!("  {source_id}");
    }

    if !output.rejected.is_empty() {
        println!();
        println!("Invalid changeset files:");
        for rejected in &output.rejected {
            println!("  {}: {}", rejected.source_id, rejected.reason);
        }
    }

    if !output.projected.is_empty() {
        println!();
        println!("Projected releases:");
        for bump in &output.projected {
            let detail = bump_detail(output, &bump.package);
            println!(
                "  {}: {} -> {} ({}){detail}",
                bump.package, bump.current_version, bump.next_version, bump.level
            );
        }
    }

    if !output.failures.is_empty() {
        println!();
        println!("Unresolvable packages:");
        for failure in &output.failures {
            println!("  {}: {}", failure.package, failure.error);
        }
    }

    if !output.unchanged_packages.is_empty() {
        println!();
        println!("Packages without changesets:");
        for package in &output.unchanged_packages {
            println!("  {} ({})", package.name, package.version);
        }
    }

    println!();
    println!(
        "Summary: {} changeset(s), {} package(s) affected",
        output.pending.len(),
        output.projected.len() + output.failures.len()
    );
}

fn bump_detail(output: &StatusOutput, package: &str) -> String {
    let Some(bumps) = output.bumps_by_package.get(package) else {
        return String::new();
    };

    if bumps.len() <= 1 {
        return String::new();
    }

    let mut sorted: Vec<_> = bumps.clone();
    sorted.sort();
    let labels: Vec<String> = sorted.iter().map(ToString::to_string).collect();
    format!(" (from: {})", labels.join(", "))
}
