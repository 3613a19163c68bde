use std::collections::HashSet;

use indexmap::IndexMap;

use shipset_core::{Author, BumpLevel, ChangeRef, ChangesetRecord};

/// One deduplicated note inside a package's group. Identity is
/// `(summary, bump)`: the same logical note filed twice merges into one entry
/// that unions the authors, keeps the first non-empty reference, and keeps
/// every merged source id so duplicates are still consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub bump: BumpLevel,
    pub summary: String,
    pub authors: Vec<Author>,
    pub reference: Option<ChangeRef>,
    pub source_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBumpGroup {
    pub package: String,
    pub entries: Vec<ReleaseEntry>,
}

impl PackageBumpGroup {
    /// Source ids of every record folded into this group, in first-seen
    /// order, without duplicates.
    #[must_use]
    pub fn consumed_source_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for entry in &self.entries {
            for id in &entry.source_ids {
                if seen.insert(id.clone()) {
                    ids.push(id.clone());
                }
            }
        }
        ids
    }

    #[must_use]
    pub fn bump_levels(&self) -> Vec<BumpLevel> {
        self.entries.iter().map(|e| e.bump).collect()
    }
}

/// Groups records by target package, in input order. Input order must already
/// be deterministic (providers sort by source id); everything downstream
/// inherits its ordering from here.
#[must_use]
pub fn aggregate(records: &[ChangesetRecord]) -> IndexMap<String, PackageBumpGroup> {
    let mut groups: IndexMap<String, PackageBumpGroup> = IndexMap::new();

    for record in records {
        for package in &record.packages {
            let group = groups
                .entry(package.clone())
                .or_insert_with(|| PackageBumpGroup {
                    package: package.clone(),
                    entries: Vec::new(),
                });
            upsert_entry(group, record);
        }
    }

    groups
}

fn upsert_entry(group: &mut PackageBumpGroup, record: &ChangesetRecord) {
    if let Some(existing) = group
        .entries
        .iter_mut()
        .find(|e| e.summary == record.summary && e.bump == record.bump)
    {
        merge_authors(&mut existing.authors, &record.authors);
        if existing.reference.is_none() {
            existing.reference = record
                .reference
                .clone()
                .filter(|reference| !reference.is_empty());
        }
        existing.source_ids.push(record.source_id.clone());
        return;
    }

    group.entries.push(ReleaseEntry {
        bump: record.bump,
        summary: record.summary.clone(),
        authors: dedup_authors(&record.authors),
        reference: record
            .reference
            .clone()
            .filter(|reference| !reference.is_empty()),
        source_ids: vec![record.source_id.clone()],
    });
}

/// Order-preserving union keyed on the normalized identity, so the same
/// person credited under differing case or `@` spellings appears once.
fn merge_authors(existing: &mut Vec<Author>, incoming: &[Author]) {
    let mut keys: HashSet<String> = existing.iter().map(Author::dedup_key).collect();
    for author in incoming {
        if keys.insert(author.dedup_key()) {
            existing.push(author.clone());
        }
    }
}

fn dedup_authors(authors: &[Author]) -> Vec<Author> {
    let mut result = Vec::new();
    merge_authors(&mut result, authors);
    result
}
