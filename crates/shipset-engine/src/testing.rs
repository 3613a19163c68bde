use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use semver::Version;

use shipset_core::{BumpLevel, ChangesetRecord, PackageInfo};

use crate::traits::{
    BumpSelection, ChangeAttribution, ChangelogWriter, ChangesetStore, InteractionProvider,
    ManifestWriter, MetadataSource, PackageSelection, Project, ProjectSource, SummaryInput,
};
use crate::Result;

pub(crate) fn changeset_file(package: &str, bump: &str, summary: &str) -> String {
    format!("---\nbump: {bump}\npackages:\n  - {package}\n---\n{summary}\n")
}

pub(crate) struct MockProjectSource {
    project: Project,
}

impl MockProjectSource {
    pub(crate) fn single_package(name: &str, version: &str) -> Self {
        let root = PathBuf::from("/mock/project");
        Self {
            project: Project {
                packages: vec![PackageInfo {
                    name: name.to_string(),
                    version: version.to_string(),
                    manifest_path: root.join("pyproject.toml"),
                }],
                root,
            },
        }
    }

    pub(crate) fn workspace(packages: &[(&str, &str)]) -> Self {
        let root = PathBuf::from("/mock/workspace");
        let mut infos: Vec<PackageInfo> = packages
            .iter()
            .map(|(name, version)| PackageInfo {
                name: (*name).to_string(),
                version: (*version).to_string(),
                manifest_path: root.join("packages").join(name).join("pyproject.toml"),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            project: Project {
                root,
                packages: infos,
            },
        }
    }
}

impl ProjectSource for MockProjectSource {
    fn discover(&self, _start_path: &Path) -> Result<Project> {
        Ok(self.project.clone())
    }
}

#[derive(Default)]
pub(crate) struct MockChangesetStore {
    files: Vec<(String, String)>,
    removed: Arc<Mutex<Vec<String>>>,
}

impl MockChangesetStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_file(mut self, source_id: &str, content: String) -> Self {
        self.files.push((source_id.to_string(), content));
        self.files.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    pub(crate) fn removed_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.removed)
    }
}

impl ChangesetStore for MockChangesetStore {
    fn load_pending(&self) -> Result<Vec<(String, String)>> {
        Ok(self.files.clone())
    }

    fn write_new(&self, record: &ChangesetRecord) -> Result<String> {
        let _ = record;
        Ok("mock-changeset.md".to_string())
    }

    fn remove(&self, source_id: &str) -> Result<()> {
        self.removed
            .lock()
            .expect("mutex poisoned")
            .push(source_id.to_string());
        Ok(())
    }

    fn source_path(&self, source_id: &str) -> PathBuf {
        PathBuf::from(".changeset").join(source_id)
    }
}

#[derive(Default)]
pub(crate) struct MockManifestWriter {
    writes: Arc<Mutex<Vec<(String, Version)>>>,
}

impl MockManifestWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn writes_handle(&self) -> Arc<Mutex<Vec<(String, Version)>>> {
        Arc::clone(&self.writes)
    }
}

impl ManifestWriter for MockManifestWriter {
    fn write_version(&self, package: &PackageInfo, version: &Version) -> Result<()> {
        self.writes
            .lock()
            .expect("mutex poisoned")
            .push((package.name.clone(), version.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MockChangelogWriter {
    merges: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChangelogWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn merges_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.merges)
    }
}

impl ChangelogWriter for MockChangelogWriter {
    fn merge_release(&self, package: &PackageInfo, body: &str) -> Result<PathBuf> {
        self.merges
            .lock()
            .expect("mutex poisoned")
            .push((package.name.clone(), body.to_string()));
        Ok(PathBuf::from("CHANGELOG.md"))
    }
}

#[derive(Default)]
pub(crate) struct MockMetadataSource {
    attributions: HashMap<String, ChangeAttribution>,
}

impl MockMetadataSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_attribution(mut self, source_id: &str, attribution: ChangeAttribution) -> Self {
        self.attributions.insert(source_id.to_string(), attribution);
        self
    }
}

impl MetadataSource for MockMetadataSource {
    fn attribution(&self, source_id: &str) -> Result<Option<ChangeAttribution>> {
        Ok(self.attributions.get(source_id).cloned())
    }
}

pub(crate) struct ScriptedInteraction {
    packages: Option<Vec<String>>,
    bump: Option<BumpLevel>,
    summary: Option<String>,
}

impl ScriptedInteraction {
    pub(crate) fn new() -> Self {
        Self {
            packages: None,
            bump: None,
            summary: None,
        }
    }

    pub(crate) fn selecting(mut self, packages: &[&str]) -> Self {
        self.packages = Some(packages.iter().map(ToString::to_string).collect());
        self
    }

    pub(crate) fn bumping(mut self, bump: BumpLevel) -> Self {
        self.bump = Some(bump);
        self
    }

    pub(crate) fn describing(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }
}

impl InteractionProvider for ScriptedInteraction {
    fn select_packages(&self, available: &[PackageInfo]) -> Result<PackageSelection> {
        match &self.packages {
            Some(names) => Ok(PackageSelection::Selected(
                available
                    .iter()
                    .filter(|p| names.contains(&p.name))
                    .cloned()
                    .collect(),
            )),
            None => Ok(PackageSelection::Cancelled),
        }
    }

    fn select_bump(&self) -> Result<BumpSelection> {
        Ok(self
            .bump
            .map_or(BumpSelection::Cancelled, BumpSelection::Selected))
    }

    fn summary(&self) -> Result<SummaryInput> {
        Ok(self
            .summary
            .clone()
            .map_or(SummaryInput::Cancelled, SummaryInput::Provided))
    }
}
