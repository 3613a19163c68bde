use std::path::Path;

use shipset_git::FileChange;

use crate::Result;

/// Diff of the working branch against the release base branch, used by the
/// pull-request check.
pub trait DiffProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or the base
    /// reference does not resolve.
    fn changed_files_since(&self, project_root: &Path, base: &str) -> Result<Vec<FileChange>>;
}
