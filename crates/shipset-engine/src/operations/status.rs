use std::path::Path;

use indexmap::{IndexMap, IndexSet};

use shipset_core::{BumpLevel, PackageInfo};

use crate::aggregate::aggregate;
use crate::error::{PackageFailure, ResolveError};
use crate::intake::{intake, RejectedChangeset};
use crate::plan::{resolve_bump, VersionBump};
use crate::traits::{ChangesetStore, ProjectSource};
use crate::Result;

pub struct StatusOutput {
    /// Source ids of pending changeset files, sorted.
    pub pending: Vec<String>,
    pub rejected: Vec<RejectedChangeset>,
    /// Projected bump per package, in first-seen order.
    pub projected: Vec<VersionBump>,
    pub bumps_by_package: IndexMap<String, Vec<BumpLevel>>,
    pub unchanged_packages: Vec<PackageInfo>,
    /// Packages whose bump could not be resolved (bad current version).
    pub failures: Vec<PackageFailure>,
}

/// Read-only view of the pending release state. Unlike `release`, resolution
/// problems are listed rather than fatal, so `status` stays usable while
/// fixing them.
pub struct StatusOperation<P, S> {
    project_source: P,
    store: S,
}

impl<P, S> StatusOperation<P, S>
where
    P: ProjectSource,
    S: ChangesetStore,
{
    pub fn new(project_source: P, store: S) -> Self {
        Self {
            project_source,
            store,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered or changeset
    /// files cannot be read.
    pub fn execute(&self, start_path: &Path) -> Result<StatusOutput> {
        let project = self.project_source.discover(start_path)?;
        let files = self.store.load_pending()?;

        let known: IndexSet<String> =
            project.packages.iter().map(|p| p.name.clone()).collect();
        let (records, rejected) = intake(&files, &known);
        let groups = aggregate(&records);
        let versions = project.current_versions();

        let mut projected = Vec::new();
        let mut failures = Vec::new();
        let mut bumps_by_package = IndexMap::new();

        for (name, group) in &groups {
            bumps_by_package.insert(name.clone(), group.bump_levels());

            let Some(current) = versions.get(name) else {
                failures.push(PackageFailure {
                    package: name.clone(),
                    error: ResolveError::NotInProject,
                });
                continue;
            };

            match resolve_bump(group, current) {
                Ok(bump) => projected.push(bump),
                Err(error) => failures.push(PackageFailure {
                    package: name.clone(),
                    error,
                }),
            }
        }

        let unchanged_packages = project
            .packages
            .into_iter()
            .filter(|p| !groups.contains_key(&p.name))
            .collect();

        Ok(StatusOutput {
            pending: files.into_iter().map(|(source_id, _)| source_id).collect(),
            rejected,
            projected,
            bumps_by_package,
            unchanged_packages,
            failures,
        })
    }
}
