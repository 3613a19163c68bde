use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use shipset_core::PackageInfo;

use crate::config::CHANGESET_DIR;
use crate::error::EngineError;
use crate::traits::{Project, ProjectSource};
use crate::Result;

const MANIFEST_FILE: &str = "pyproject.toml";
const SKIP_DIRS: [&str; 6] = ["venv", "env", "build", "dist", "__pycache__", "node_modules"];
const DEFAULT_VERSION: &str = "0.0.0";

#[derive(Deserialize)]
struct Manifest {
    project: Option<ProjectTable>,
}

#[derive(Deserialize)]
struct ProjectTable {
    name: Option<String>,
    version: Option<String>,
}

/// Discovers packages by scanning the project tree for `pyproject.toml`
/// manifests.
pub struct FsProjectSource;

impl FsProjectSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsProjectSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectSource for FsProjectSource {
    fn discover(&self, start_path: &Path) -> Result<Project> {
        let start = start_path
            .canonicalize()
            .map_err(|source| EngineError::ManifestRead {
                path: start_path.to_path_buf(),
                source,
            })?;

        let root = find_project_root(&start)?;
        let packages = collect_packages(&root)?;

        Ok(Project { root, packages })
    }
}

/// Walks up from `start` to the first directory holding a `.changeset` or
/// `.git` directory; a directory with its own manifest is the fallback when
/// neither marker exists yet.
fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut fallback: Option<PathBuf> = None;
    let mut current = Some(start.to_path_buf());

    while let Some(dir) = current {
        if dir.join(CHANGESET_DIR).is_dir() || dir.join(".git").is_dir() {
            return Ok(dir);
        }
        if fallback.is_none() && dir.join(MANIFEST_FILE).is_file() {
            fallback = Some(dir.clone());
        }
        current = dir.parent().map(Path::to_path_buf);
    }

    fallback.ok_or_else(|| EngineError::ProjectNotFound(start.to_path_buf()))
}

fn collect_packages(root: &Path) -> Result<Vec<PackageInfo>> {
    let pattern = root.join("**").join(MANIFEST_FILE);
    let pattern = pattern.to_string_lossy();

    let mut packages = Vec::new();

    for entry in glob::glob(&pattern)? {
        let manifest_path = entry.map_err(glob::GlobError::into_error)?;

        if is_skipped(root, &manifest_path) {
            continue;
        }

        packages.push(read_package(&manifest_path)?);
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(packages)
}

fn is_skipped(root: &Path, manifest_path: &Path) -> bool {
    let Ok(relative) = manifest_path.strip_prefix(root) else {
        return true;
    };

    relative.components().any(|component| match component {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref())
        }
        _ => false,
    })
}

fn read_package(manifest_path: &Path) -> Result<PackageInfo> {
    let content =
        std::fs::read_to_string(manifest_path).map_err(|source| EngineError::ManifestRead {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let manifest: Manifest =
        toml::from_str(&content).map_err(|source| EngineError::ManifestParse {
            path: manifest_path.to_path_buf(),
            source: Box::new(source),
        })?;

    let directory_name = manifest_path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let (name, version) = match manifest.project {
        Some(project) => (
            project.name.unwrap_or(directory_name),
            project.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        ),
        None => (directory_name, DEFAULT_VERSION.to_string()),
    };

    Ok(PackageInfo {
        name,
        version,
        manifest_path: manifest_path.to_path_buf(),
    })
}
