use std::fs;
use std::path::{Path, PathBuf};

use shipset_core::ChangesetRecord;
use shipset_parse::serialize_record;

use crate::config::{ShipsetConfig, CHANGESET_DIR};
use crate::error::EngineError;
use crate::traits::ChangesetStore;
use crate::Result;

const MAX_FILENAME_ATTEMPTS: usize = 100;

const README_CONTENT: &str = "# Changesets

This directory holds pending changeset files, one per change. Run
`shipset add` to create one; `shipset release` consumes them.
";

/// Changeset storage under `<project root>/.changeset/`.
pub struct FsChangesetStore {
    project_root: PathBuf,
    changeset_dir: PathBuf,
}

impl FsChangesetStore {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            changeset_dir: project_root.join(CHANGESET_DIR),
        }
    }

    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    /// Creates the changeset directory with its README and default config
    /// the first time anything is written, so no explicit init step exists.
    fn ensure_initialized(&self) -> Result<()> {
        if self.changeset_dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.changeset_dir)?;
        fs::write(self.changeset_dir.join("README.md"), README_CONTENT)
            .map_err(EngineError::ChangesetFileWrite)?;
        ShipsetConfig::default().write(&self.changeset_dir)?;

        tracing::debug!(dir = %self.changeset_dir.display(), "initialized changeset directory");

        Ok(())
    }
}

impl ChangesetStore for FsChangesetStore {
    fn load_pending(&self) -> Result<Vec<(String, String)>> {
        let entries = match fs::read_dir(&self.changeset_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(EngineError::ChangesetList {
                    path: self.changeset_dir.clone(),
                    source,
                });
            }
        };

        let mut names = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|source| EngineError::ChangesetList {
                path: self.changeset_dir.clone(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            if name == "README.md" {
                continue;
            }

            names.push(name);
        }

        // Directory iteration order is platform-dependent; the engine's
        // ordering guarantees start here.
        names.sort();

        let mut files = Vec::with_capacity(names.len());
        for name in names {
            let path = self.changeset_dir.join(&name);
            let content =
                fs::read_to_string(&path).map_err(|source| EngineError::ChangesetFileRead {
                    path,
                    source,
                })?;
            files.push((name, content));
        }

        Ok(files)
    }

    fn write_new(&self, record: &ChangesetRecord) -> Result<String> {
        self.ensure_initialized()?;

        let content = serialize_record(record).map_err(EngineError::ChangesetSerialize)?;
        let filename = generate_unique_filename(&self.changeset_dir);
        fs::write(self.changeset_dir.join(&filename), content)
            .map_err(EngineError::ChangesetFileWrite)?;

        Ok(filename)
    }

    fn remove(&self, source_id: &str) -> Result<()> {
        let path = self.changeset_dir.join(source_id);
        fs::remove_file(&path).map_err(|source| EngineError::ChangesetDelete { path, source })
    }

    fn source_path(&self, source_id: &str) -> PathBuf {
        self.changeset_dir
            .strip_prefix(&self.project_root)
            .map_or_else(|_| self.changeset_dir.clone(), Path::to_path_buf)
            .join(source_id)
    }
}

fn generate_unique_filename(changeset_dir: &Path) -> String {
    for _ in 0..MAX_FILENAME_ATTEMPTS {
        if let Some(name) = petname::petname(3, "-") {
            let filename = format!("{name}.md");

            if !changeset_dir.join(&filename).exists() {
                return filename;
            }
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("changeset-{timestamp}.md")
}
