use std::path::PathBuf;

use crate::{FileChange, FileStatus, GitError, Result};

use super::Repository;

impl Repository {
    /// Files changed between the merge base of `base` and HEAD, and HEAD
    /// itself (the `base...HEAD` comparison used for pull-request diffs).
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if `base` cannot be resolved.
    pub fn changed_files_since(&self, base: &str) -> Result<Vec<FileChange>> {
        let base_commit = self.resolve_commit(base)?;
        let head_commit = self.resolve_commit("HEAD")?;

        let merge_base = self
            .inner
            .merge_base(base_commit.id(), head_commit.id())
            .map_err(|_| GitError::RefNotFound {
                refspec: base.to_string(),
            })?;
        let merge_base_tree = self.inner.find_commit(merge_base)?.tree()?;
        let head_tree = head_commit.tree()?;

        let mut diff =
            self.inner
                .diff_tree_to_tree(Some(&merge_base_tree), Some(&head_tree), None)?;

        let mut find_opts = git2::DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let mut changes = Vec::new();

        for delta in diff.deltas() {
            let status = match delta.status() {
                git2::Delta::Added => FileStatus::Added,
                git2::Delta::Deleted => FileStatus::Deleted,
                git2::Delta::Modified => FileStatus::Modified,
                git2::Delta::Renamed => FileStatus::Renamed,
                _ => continue,
            };

            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(PathBuf::from)
                .ok_or(GitError::MissingDeltaPath)?;

            changes.push(FileChange::new(path, status));
        }

        Ok(changes)
    }

    fn resolve_commit(&self, refspec: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_commit().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_file, setup_test_repo};
    use crate::FileStatus;

    #[test]
    fn detect_added_file() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;

        commit_file(&repo, dir.path(), "new_file.txt", "content", "Add file")?;

        let changes = repo.changed_files_since("HEAD~1")?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, FileStatus::Added);
        assert_eq!(changes[0].path.to_string_lossy(), "new_file.txt");

        Ok(())
    }

    #[test]
    fn detect_modified_file() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;

        commit_file(&repo, dir.path(), "file.txt", "initial", "Add file")?;
        commit_file(&repo, dir.path(), "file.txt", "modified", "Modify file")?;

        let changes = repo.changed_files_since("HEAD~1")?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].status, FileStatus::Modified);

        Ok(())
    }

    #[test]
    fn compares_against_the_branch_point() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;

        commit_file(&repo, dir.path(), "shared.txt", "v1", "Add shared")?;

        let head = repo.inner.head()?.peel_to_commit()?;
        repo.inner.branch("base", &head, false)?;

        commit_file(&repo, dir.path(), "feature.txt", "feature", "Add feature")?;

        let changes = repo.changed_files_since("base")?;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path.to_string_lossy(), "feature.txt");

        Ok(())
    }

    #[test]
    fn ref_not_found_error() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        let result = repo.changed_files_since("nonexistent-ref");
        assert!(result.is_err());

        Ok(())
    }
}
