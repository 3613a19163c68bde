use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

use shipset_core::BumpLevel;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid current version '{version}'")]
    InvalidCurrentVersion {
        version: String,
        #[source]
        source: semver::Error,
    },
}

/// Parses a current-version string supplied by a manifest.
///
/// # Errors
///
/// Returns `VersionError::InvalidCurrentVersion` if the string is not a
/// well-formed semantic version.
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    Version::parse(version.trim()).map_err(|source| VersionError::InvalidCurrentVersion {
        version: version.to_string(),
        source,
    })
}

/// Increments `version` at `level`, resetting lower components to zero.
/// Pre-release and build metadata do not survive a bump.
#[must_use]
pub fn bump_version(version: &Version, level: BumpLevel) -> Version {
    let mut next = version.clone();

    match level {
        BumpLevel::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
        }
        BumpLevel::Minor => {
            next.minor += 1;
            next.patch = 0;
        }
        BumpLevel::Patch => {
            next.patch += 1;
        }
    }

    next.pre = Prerelease::EMPTY;
    next.build = BuildMetadata::EMPTY;

    next
}

/// Most severe level in `levels`, or `None` for an empty slice.
#[must_use]
pub fn max_bump_level(levels: &[BumpLevel]) -> Option<BumpLevel> {
    levels.iter().copied().max()
}
