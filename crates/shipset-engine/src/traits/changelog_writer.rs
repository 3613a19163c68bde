use std::path::PathBuf;

use shipset_core::PackageInfo;

use crate::Result;

pub trait ChangelogWriter: Send + Sync {
    /// Prepends a rendered release section to the package's changelog,
    /// creating the file when missing. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the changelog cannot be read or written.
    fn merge_release(&self, package: &PackageInfo, body: &str) -> Result<PathBuf>;
}
