use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Result};

pub const CHANGESET_DIR: &str = ".changeset";
pub const CONFIG_FILE: &str = "config.json";

fn default_base_branch() -> String {
    "main".to_string()
}

/// Repository-level configuration stored at `.changeset/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipsetConfig {
    #[serde(rename = "baseBranch", default = "default_base_branch")]
    pub base_branch: String,
}

impl Default for ShipsetConfig {
    fn default() -> Self {
        Self {
            base_branch: default_base_branch(),
        }
    }
}

impl ShipsetConfig {
    /// Loads the config from a changeset directory; a missing file yields the
    /// defaults so fresh checkouts work without an init step.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(changeset_dir: &Path) -> Result<Self> {
        let path = changeset_dir.join(CONFIG_FILE);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(EngineError::ConfigRead { path, source }),
        };

        serde_json::from_str(&content).map_err(|source| EngineError::ConfigParse { path, source })
    }

    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, changeset_dir: &Path) -> Result<()> {
        let path = changeset_dir.join(CONFIG_FILE);
        let content = serde_json::to_string_pretty(self)
            .map_err(|source| EngineError::ConfigParse {
                path: path.clone(),
                source,
            })?;
        std::fs::write(&path, content).map_err(|source| EngineError::ConfigWrite { path, source })
    }
}
