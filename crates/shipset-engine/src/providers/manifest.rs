use semver::Version;
use toml_edit::{value, DocumentMut};

use shipset_core::PackageInfo;

use crate::error::EngineError;
use crate::traits::ManifestWriter;
use crate::Result;

/// Writes versions into `pyproject.toml` files, preserving formatting and
/// comments.
pub struct TomlManifestWriter;

impl TomlManifestWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TomlManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestWriter for TomlManifestWriter {
    fn write_version(&self, package: &PackageInfo, version: &Version) -> Result<()> {
        let path = &package.manifest_path;

        let content =
            std::fs::read_to_string(path).map_err(|source| EngineError::ManifestRead {
                path: path.clone(),
                source,
            })?;

        let mut doc: DocumentMut =
            content
                .parse()
                .map_err(|source| EngineError::ManifestEdit {
                    path: path.clone(),
                    source,
                })?;

        let project = doc
            .get_mut("project")
            .and_then(|item| item.as_table_like_mut())
            .ok_or_else(|| EngineError::ManifestField {
                path: path.clone(),
                field: "project",
            })?;

        project.insert("version", value(version.to_string()));

        std::fs::write(path, doc.to_string()).map_err(|source| EngineError::ManifestWrite {
            path: path.clone(),
            source,
        })
    }
}
