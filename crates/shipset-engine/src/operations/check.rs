use std::collections::HashSet;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use shipset_core::PackageInfo;
use shipset_git::{FileChange, FileStatus};

use crate::config::CHANGESET_DIR;
use crate::intake::{intake, RejectedChangeset};
use crate::traits::{ChangesetStore, DiffProvider, Project, ProjectSource};
use crate::Result;

pub struct CheckOutput {
    /// Packages with code changes in the diff.
    pub affected_packages: Vec<PackageInfo>,
    /// Packages named by changesets added in the diff.
    pub covered_packages: HashSet<String>,
    /// Affected packages with no covering changeset.
    pub uncovered_packages: Vec<PackageInfo>,
    /// Source ids of changeset files the diff adds.
    pub new_changesets: Vec<String>,
    /// Changeset files the diff deletes.
    pub deleted_changesets: Vec<PathBuf>,
    pub rejected: Vec<RejectedChangeset>,
}

impl CheckOutput {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.uncovered_packages.is_empty()
            && self.deleted_changesets.is_empty()
            && self.rejected.is_empty()
    }
}

/// Validates that a branch carries a changeset for every package it touches,
/// and that it does not delete pending changesets.
pub struct CheckOperation<P, S, D> {
    project_source: P,
    store: S,
    diff: D,
}

impl<P, S, D> CheckOperation<P, S, D>
where
    P: ProjectSource,
    S: ChangesetStore,
    D: DiffProvider,
{
    pub fn new(project_source: P, store: S, diff: D) -> Self {
        Self {
            project_source,
            store,
            diff,
        }
    }

    /// # Errors
    ///
    /// Returns an error if the project cannot be discovered or the diff
    /// against `base` fails.
    pub fn execute(&self, start_path: &Path, base: &str) -> Result<CheckOutput> {
        let project = self.project_source.discover(start_path)?;
        let changes = self.diff.changed_files_since(&project.root, base)?;

        let mut new_changesets = Vec::new();
        let mut deleted_changesets = Vec::new();
        let mut code_changes = Vec::new();

        for change in &changes {
            match changeset_source_id(&change.path) {
                Some(source_id) => match change.status {
                    FileStatus::Deleted => deleted_changesets.push(change.path.clone()),
                    _ => new_changesets.push(source_id),
                },
                None if change.path.starts_with(CHANGESET_DIR) => {}
                None => code_changes.push(change),
            }
        }
        new_changesets.sort();

        let affected_packages = affected_packages(&project, &code_changes);
        let (covered_packages, rejected) =
            self.covered_packages(&project, &new_changesets)?;

        let uncovered_packages = affected_packages
            .iter()
            .filter(|p| !covered_packages.contains(&p.name))
            .cloned()
            .collect();

        Ok(CheckOutput {
            affected_packages,
            covered_packages,
            uncovered_packages,
            new_changesets,
            deleted_changesets,
            rejected,
        })
    }

    fn covered_packages(
        &self,
        project: &Project,
        new_changesets: &[String],
    ) -> Result<(HashSet<String>, Vec<RejectedChangeset>)> {
        let wanted: HashSet<&String> = new_changesets.iter().collect();
        let files: Vec<(String, String)> = self
            .store
            .load_pending()?
            .into_iter()
            .filter(|(source_id, _)| wanted.contains(source_id))
            .collect();

        let known: IndexSet<String> =
            project.packages.iter().map(|p| p.name.clone()).collect();
        let (records, rejected) = intake(&files, &known);

        let covered = records
            .iter()
            .flat_map(|r| r.packages.iter().cloned())
            .collect();

        Ok((covered, rejected))
    }
}

/// Source id of a changed file when it is a changeset note, `None` otherwise.
fn changeset_source_id(path: &Path) -> Option<String> {
    if !path.starts_with(CHANGESET_DIR) {
        return None;
    }
    if path.extension().is_none_or(|ext| ext != "md") {
        return None;
    }

    let name = path.file_name()?.to_string_lossy().to_string();
    if name == "README.md" {
        return None;
    }

    Some(name)
}

fn affected_packages(project: &Project, code_changes: &[&FileChange]) -> Vec<PackageInfo> {
    project
        .packages
        .iter()
        .filter(|package| {
            let dir = package_dir(project, package);
            code_changes
                .iter()
                .any(|change| dir.as_os_str().is_empty() || change.path.starts_with(&dir))
        })
        .cloned()
        .collect()
}

fn package_dir(project: &Project, package: &PackageInfo) -> PathBuf {
    let dir = package
        .manifest_path
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf);
    dir.strip_prefix(&project.root)
        .map_or(dir.clone(), Path::to_path_buf)
}
