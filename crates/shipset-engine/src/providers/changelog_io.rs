use std::path::{Path, PathBuf};

use shipset_changelog::merge_release_into;
use shipset_core::PackageInfo;

use crate::error::EngineError;
use crate::traits::ChangelogWriter;
use crate::Result;

const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Maintains `CHANGELOG.md` next to each package's manifest.
pub struct FsChangelogWriter;

impl FsChangelogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn changelog_path(package: &PackageInfo) -> PathBuf {
        package
            .manifest_path
            .parent()
            .map_or_else(|| PathBuf::from(CHANGELOG_FILE), Path::to_path_buf)
            .join(CHANGELOG_FILE)
    }
}

impl Default for FsChangelogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogWriter for FsChangelogWriter {
    fn merge_release(&self, package: &PackageInfo, body: &str) -> Result<PathBuf> {
        let path = Self::changelog_path(package);

        let existing = match std::fs::read_to_string(&path) {
            Ok(existing) => existing,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(source) => {
                return Err(EngineError::ChangelogWrite {
                    path: path.clone(),
                    source,
                });
            }
        };

        let merged = merge_release_into(&existing, &package.name, body);

        std::fs::write(&path, merged).map_err(|source| EngineError::ChangelogWrite {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}
