use shipset_core::{Author, BumpLevel, ChangeRef};

/// One rendered changelog line: summary plus the attribution that survived
/// aggregation. Authors are already deduplicated, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub level: BumpLevel,
    pub summary: String,
    pub authors: Vec<Author>,
    pub reference: Option<ChangeRef>,
}

impl ChangelogEntry {
    #[must_use]
    pub fn new(level: BumpLevel, summary: impl Into<String>) -> Self {
        Self {
            level,
            summary: summary.into(),
            authors: Vec::new(),
            reference: None,
        }
    }

    #[must_use]
    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: ChangeRef) -> Self {
        self.reference = Some(reference);
        self
    }
}
