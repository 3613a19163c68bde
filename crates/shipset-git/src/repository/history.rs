use std::path::Path;

use crate::{CommitInfo, Result};

use super::Repository;

impl Repository {
    /// Finds the newest commit that introduced `path` (the commit whose tree
    /// contains the file while no parent tree does), mirroring
    /// `git log --diff-filter=A -- <path>`.
    ///
    /// # Errors
    ///
    /// Returns an error if history cannot be walked. An unborn HEAD or an
    /// untracked path yields `Ok(None)`.
    pub fn introducing_commit(&self, path: &Path) -> Result<Option<CommitInfo>> {
        if self.inner.head().is_err() {
            return Ok(None);
        }

        let relative = self.to_relative_path(path);

        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;

            if commit.tree()?.get_path(&relative).is_err() {
                continue;
            }

            let in_any_parent = commit
                .parents()
                .any(|parent| parent.tree().is_ok_and(|t| t.get_path(&relative).is_ok()));

            if !in_any_parent {
                return Ok(Some(CommitInfo {
                    sha: commit.id().to_string(),
                    message: commit.message().unwrap_or_default().to_string(),
                    author_name: commit.author().name().unwrap_or_default().to_string(),
                }));
            }
        }

        Ok(None)
    }
}
