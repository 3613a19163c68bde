use indexmap::IndexSet;
use thiserror::Error;

use shipset_core::ChangesetRecord;
use shipset_parse::{parse_record, MalformedChangeset};

#[derive(Debug, Error)]
pub enum RejectReason {
    #[error(transparent)]
    Malformed(#[from] MalformedChangeset),

    #[error("unknown package '{package}' (available: {available})")]
    UnknownPackage { package: String, available: String },
}

/// One changeset file that failed validation. Rejections are collected per
/// file so a single bad changeset never hides the state of the others.
#[derive(Debug)]
pub struct RejectedChangeset {
    pub source_id: String,
    pub reason: RejectReason,
}

/// Parses and validates raw changeset files in their given (deterministic)
/// order. Valid records come back in input order; each invalid file produces
/// one rejection instead of aborting the batch.
#[must_use]
pub fn intake(
    files: &[(String, String)],
    known_packages: &IndexSet<String>,
) -> (Vec<ChangesetRecord>, Vec<RejectedChangeset>) {
    let mut records = Vec::new();
    let mut rejected = Vec::new();

    for (source_id, raw) in files {
        match parse_record(source_id, raw) {
            Ok(record) => match unknown_package(&record, known_packages) {
                Some(package) => rejected.push(RejectedChangeset {
                    source_id: source_id.clone(),
                    reason: RejectReason::UnknownPackage {
                        package,
                        available: known_packages
                            .iter()
                            .map(String::as_str)
                            .collect::<Vec<_>>()
                            .join(", "),
                    },
                }),
                None => records.push(record),
            },
            Err(source) => rejected.push(RejectedChangeset {
                source_id: source_id.clone(),
                reason: source.into(),
            }),
        }
    }

    (records, rejected)
}

fn unknown_package(record: &ChangesetRecord, known: &IndexSet<String>) -> Option<String> {
    record
        .packages
        .iter()
        .find(|p| !known.contains(*p))
        .cloned()
}
