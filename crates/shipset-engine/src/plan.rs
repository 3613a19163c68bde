use indexmap::{IndexMap, IndexSet};
use semver::Version;

use shipset_changelog::{render_release, ChangelogEntry, RepositoryInfo};
use shipset_core::BumpLevel;
use shipset_version::{bump_version, max_bump_level, parse_version};

use crate::aggregate::{aggregate, PackageBumpGroup, ReleaseEntry};
use crate::error::{PackageFailure, ResolutionFailure, ResolveError};
use crate::intake::{intake, RejectedChangeset};

/// Resolved bump decision for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBump {
    pub package: String,
    pub current_version: Version,
    pub next_version: Version,
    pub level: BumpLevel,
}

/// Everything needed to release one package: the version to write, the
/// changelog section to prepend, and the changeset files to delete once both
/// writes succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub package: String,
    pub current_version: Version,
    pub next_version: Version,
    pub level: BumpLevel,
    pub changelog_body: String,
    pub consumed_source_ids: Vec<String>,
}

/// Resolves a group into a version bump: the most severe level across its
/// records wins, and the next version increments the current one at that
/// level.
///
/// # Errors
///
/// Returns `InvalidCurrentVersion` if `current_version` is not well-formed.
pub fn resolve_bump(
    group: &PackageBumpGroup,
    current_version: &str,
) -> Result<VersionBump, ResolveError> {
    let current = parse_version(current_version)?;

    // Aggregation never produces an empty group; guard anyway so a misuse
    // cannot invent a release.
    let Some(level) = max_bump_level(&group.bump_levels()) else {
        return Err(ResolveError::NotInProject);
    };

    Ok(VersionBump {
        package: group.package.clone(),
        next_version: bump_version(&current, level),
        current_version: current,
        level,
    })
}

fn changelog_entries(entries: &[ReleaseEntry]) -> Vec<ChangelogEntry> {
    entries
        .iter()
        .map(|entry| {
            let mut rendered = ChangelogEntry::new(entry.bump, entry.summary.clone())
                .with_authors(entry.authors.clone());
            if let Some(reference) = &entry.reference {
                rendered = rendered.with_reference(reference.clone());
            }
            rendered
        })
        .collect()
}

/// Builds the full release plan, one entry per package with pending records,
/// in package-name order. All-or-nothing: if any package fails to resolve,
/// every failure is collected and no plan is returned.
///
/// # Errors
///
/// Returns `ResolutionFailure` listing every package whose current version is
/// missing or malformed.
pub fn build_plan(
    groups: &IndexMap<String, PackageBumpGroup>,
    current_versions: &IndexMap<String, String>,
    repo: Option<&RepositoryInfo>,
) -> Result<Vec<ReleasePlan>, ResolutionFailure> {
    let mut names: Vec<&String> = groups.keys().collect();
    names.sort();

    let mut plans = Vec::new();
    let mut failures = Vec::new();

    for name in names {
        let group = &groups[name];

        let Some(current) = current_versions.get(name) else {
            failures.push(PackageFailure {
                package: name.clone(),
                error: ResolveError::NotInProject,
            });
            continue;
        };

        match resolve_bump(group, current) {
            Ok(bump) => {
                let body = render_release(
                    &bump.next_version,
                    &changelog_entries(&group.entries),
                    repo,
                );
                plans.push(ReleasePlan {
                    package: bump.package,
                    current_version: bump.current_version,
                    next_version: bump.next_version,
                    level: bump.level,
                    changelog_body: body,
                    consumed_source_ids: group.consumed_source_ids(),
                });
            }
            Err(error) => failures.push(PackageFailure {
                package: name.clone(),
                error,
            }),
        }
    }

    if failures.is_empty() {
        Ok(plans)
    } else {
        Err(ResolutionFailure { failures })
    }
}

/// Outcome of one full engine run over raw changeset files.
#[derive(Debug)]
pub struct PlanOutcome {
    pub plans: Vec<ReleasePlan>,
    pub rejected: Vec<RejectedChangeset>,
}

/// The whole pipeline as one pure function: parse, validate, aggregate,
/// resolve, render. Stateless and idempotent; re-running on the same input
/// yields byte-identical plans.
///
/// # Errors
///
/// Returns `ResolutionFailure` when any package's bump cannot be resolved.
/// Per-file parse/validation problems are returned in
/// [`PlanOutcome::rejected`] instead, so one bad file does not hide the rest.
pub fn plan_release(
    files: &[(String, String)],
    current_versions: &IndexMap<String, String>,
    repo: Option<&RepositoryInfo>,
) -> Result<PlanOutcome, ResolutionFailure> {
    let known: IndexSet<String> = current_versions.keys().cloned().collect();
    let (records, rejected) = intake(files, &known);
    let groups = aggregate(&records);
    let plans = build_plan(&groups, current_versions, repo)?;

    Ok(PlanOutcome { plans, rejected })
}
