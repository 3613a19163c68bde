use std::path::PathBuf;

use shipset_core::ChangesetRecord;

use crate::Result;

/// Storage for pending changeset files. The engine only ever sees
/// `(source id, raw text)` pairs; listing order is the store's contract and
/// must be deterministic (sorted by source id).
pub trait ChangesetStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the directory or any file cannot be read.
    fn load_pending(&self) -> Result<Vec<(String, String)>>;

    /// Writes a new changeset and returns its generated source id.
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset cannot be serialized or written.
    fn write_new(&self, record: &ChangesetRecord) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the file cannot be deleted.
    fn remove(&self, source_id: &str) -> Result<()>;

    /// Repository-relative path of a source id, for display and for commit
    /// history lookups.
    fn source_path(&self, source_id: &str) -> PathBuf;
}
