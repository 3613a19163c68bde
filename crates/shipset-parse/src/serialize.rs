use serde::Serialize;

use shipset_core::{BumpLevel, ChangesetRecord};

use crate::error::MalformedChangeset;
use crate::parse::FRONT_MATTER_DELIMITER;

#[derive(Serialize)]
struct FrontMatterOutput<'a> {
    bump: BumpLevel,
    packages: Vec<&'a str>,
}

/// Renders a record back into the changeset file format. The output parses
/// back to an equal record (minus enrichment data, which is never stored).
///
/// # Errors
///
/// Returns `MalformedChangeset` if the record lists no packages, has an empty
/// summary, or YAML serialization fails.
#[must_use = "serialization result should be handled"]
pub fn serialize_record(record: &ChangesetRecord) -> Result<String, MalformedChangeset> {
    if record.packages.is_empty() {
        return Err(MalformedChangeset::NoPackages);
    }
    if record.summary.trim().is_empty() {
        return Err(MalformedChangeset::EmptySummary);
    }

    let front_matter = FrontMatterOutput {
        bump: record.bump,
        packages: record.packages.iter().map(String::as_str).collect(),
    };

    let yaml = serde_yml::to_string(&front_matter)?;

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&yaml);
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push_str(&record.summary);
    output.push('\n');

    Ok(output)
}
