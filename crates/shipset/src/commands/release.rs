use std::path::Path;

use shipset_changelog::RepositoryInfo;
use shipset_engine::operations::{ReleaseInput, ReleaseOperation, ReleaseOutcome};
use shipset_engine::providers::{
    FsChangelogWriter, FsChangesetStore, FsProjectSource, GhCli, GitMetadataSource,
    TomlManifestWriter,
};
use shipset_engine::traits::ProjectSource;
use shipset_engine::EngineError;
use shipset_git::Repository;

use super::ReleaseArgs;
use crate::error::{CliError, Result};

pub(super) fn run(args: ReleaseArgs, start_path: &Path) -> Result<()> {
    let project_source = FsProjectSource::new();
    let project = project_source.discover(start_path)?;
    let store = FsChangesetStore::new(&project.root);

    let repo_info = repository_info(&project.root);
    let hosting = repo_info
        .as_ref()
        .map(|info| GhCli::new(info.owner.clone(), info.repo.clone()));
    let metadata = GitMetadataSource::new(&project.root, hosting);

    let operation = ReleaseOperation::new(
        project_source,
        store,
        TomlManifestWriter::new(),
        FsChangelogWriter::new(),
    )
    .with_metadata_source(metadata)
    .with_repository(repo_info);

    let outcome = match operation.execute(start_path, &ReleaseInput { dry_run: args.dry_run }) {
        Ok(outcome) => outcome,
        Err(EngineError::RejectedChangesets(rejected)) => {
            eprintln!("Invalid changeset files:");
            for item in &rejected {
                eprintln!("  {}: {}", item.source_id, item.reason);
            }
            return Err(CliError::ChangesetsRejected {
                count: rejected.len(),
            });
        }
        Err(EngineError::Resolution(failure)) => {
            eprintln!("Unresolvable packages:");
            for item in &failure.failures {
                eprintln!("  {}: {}", item.package, item.error);
            }
            return Err(CliError::ResolutionFailed {
                count: failure.failures.len(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    print_outcome(&outcome);

    if let Some(path) = &args.pr_description {
        std::fs::write(path, &outcome.pr_description)?;
        println!("Wrote pull-request description to {}", path.display());
    }

    Ok(())
}

/// Repository coordinates from the git remote, when there is one. A missing
/// or unparsable remote only disables links and PR-author lookups.
fn repository_info(project_root: &Path) -> Option<RepositoryInfo> {
    let repo = Repository::open(project_root).ok()?;
    let url = repo.remote_url().ok()??;
    RepositoryInfo::from_remote_url(&url).ok()
}

fn print_outcome(outcome: &ReleaseOutcome) {
    if outcome.plans.is_empty() {
        println!("No changesets found. Nothing to do.");
        return;
    }

    println!("Releasing {} package(s):", outcome.plans.len());
    for plan in &outcome.plans {
        println!(
            "  {}: {} -> {} ({})",
            plan.package, plan.current_version, plan.next_version, plan.level
        );
    }

    if outcome.applied {
        println!();
        println!("Updated manifests and changelogs; consumed changesets removed.");
    } else {
        println!();
        println!("Dry run, nothing written.");
        for plan in &outcome.plans {
            println!();
            println!("Changelog for {}:", plan.package);
            println!("{}", plan.changelog_body);
        }
    }
}
