use shipset_core::{Author, ChangeRef};

use crate::Result;

/// Attribution resolved for one changeset file from version-control and
/// hosting metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeAttribution {
    pub reference: Option<ChangeRef>,
    pub authors: Vec<Author>,
}

/// Optional enrichment step run between intake and aggregation. The engine
/// treats whatever comes back as already-resolved data; lookups, fallbacks
/// and network access all live behind this seam.
pub trait MetadataSource: Send + Sync {
    /// # Errors
    ///
    /// Returns an error only for genuine failures; a changeset with no
    /// discoverable history resolves to `Ok(None)`.
    fn attribution(&self, source_id: &str) -> Result<Option<ChangeAttribution>>;
}

/// Code-hosting lookup used to turn a PR number into the author's login.
pub trait HostingClient: Send + Sync {
    /// # Errors
    ///
    /// Returns an error only for genuine failures; an unavailable CLI or an
    /// unknown PR resolves to `Ok(None)` so callers fall back to commit
    /// metadata.
    fn pr_author(&self, number: u64) -> Result<Option<String>>;
}

/// `None` behaves as a client that never resolves, so callers can make the
/// lookup conditional without changing types.
impl<H: HostingClient> HostingClient for Option<H> {
    fn pr_author(&self, number: u64) -> Result<Option<String>> {
        match self {
            Some(client) => client.pr_author(number),
            None => Ok(None),
        }
    }
}
