use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use shipset_core::PackageInfo;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub root: PathBuf,
    /// Packages sorted by name.
    pub packages: Vec<PackageInfo>,
}

impl Project {
    /// Package name to current version string, as supplied by the manifests.
    #[must_use]
    pub fn current_versions(&self) -> IndexMap<String, String> {
        self.packages
            .iter()
            .map(|p| (p.name.clone(), p.version.clone()))
            .collect()
    }

    #[must_use]
    pub fn package(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.iter().find(|p| p.name == name)
    }
}

pub trait ProjectSource: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no project can be found or a manifest cannot be
    /// read.
    fn discover(&self, start_path: &Path) -> Result<Project>;
}
