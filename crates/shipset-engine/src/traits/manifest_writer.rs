use semver::Version;

use shipset_core::PackageInfo;

use crate::Result;

pub trait ManifestWriter: Send + Sync {
    /// Writes the new version into the package's manifest, preserving the
    /// rest of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read, parsed, or written.
    fn write_version(&self, package: &PackageInfo, version: &Version) -> Result<()>;
}
