use semver::Version;

use shipset_core::{Author, BumpLevel};

use crate::entry::ChangelogEntry;
use crate::forge::RepositoryInfo;

const SHORT_HASH_LEN: usize = 7;

fn section_title(level: BumpLevel) -> &'static str {
    match level {
        BumpLevel::Major => "Major Changes",
        BumpLevel::Minor => "Minor Changes",
        BumpLevel::Patch => "Patch Changes",
    }
}

fn short_hash(hash: &str) -> &str {
    let end = hash
        .char_indices()
        .nth(SHORT_HASH_LEN)
        .map_or(hash.len(), |(i, _)| i);
    &hash[..end]
}

fn citation(entry: &ChangelogEntry, repo: Option<&RepositoryInfo>) -> Option<String> {
    let reference = entry.reference.as_ref()?;

    if let Some(number) = reference.pull_request {
        return Some(match repo {
            Some(repo) => format!("[#{number}]({})", repo.pull_request_url(number)),
            None => format!("#{number}"),
        });
    }

    let commit = reference.commit.as_deref()?;
    let short = short_hash(commit);
    Some(match repo {
        Some(repo) => format!("[`{short}`]({})", repo.commit_url(commit)),
        None => format!("`{short}`"),
    })
}

fn credit(authors: &[Author]) -> Option<String> {
    let mentions: Vec<String> = authors.iter().map(Author::mention).collect();

    match mentions.as_slice() {
        [] => None,
        [only] => Some(format!("Thanks {only}!")),
        [head @ .., last] => Some(format!("Thanks {} and {last}!", head.join(", "))),
    }
}

/// Renders one changelog bullet: optional citation, the summary verbatim, an
/// optional credit suffix.
#[must_use]
pub fn render_entry(entry: &ChangelogEntry, repo: Option<&RepositoryInfo>) -> String {
    let mut line = String::from("- ");

    if let Some(citation) = citation(entry, repo) {
        line.push_str(&citation);
        line.push(' ');
    }

    line.push_str(&entry.summary);

    if let Some(credit) = credit(&entry.authors) {
        line.push(' ');
        line.push_str(&credit);
    }

    line
}

/// Renders the release section for one package version. Sections appear in
/// Major/Minor/Patch order, empty sections are omitted, and entries keep
/// their given order. Byte-identical output for identical input.
#[must_use]
pub fn render_release(
    version: &Version,
    entries: &[ChangelogEntry],
    repo: Option<&RepositoryInfo>,
) -> String {
    let mut output = format!("## {version}\n");

    for level in BumpLevel::ALL {
        let section: Vec<&ChangelogEntry> =
            entries.iter().filter(|e| e.level == level).collect();
        if section.is_empty() {
            continue;
        }

        output.push('\n');
        output.push_str("### ");
        output.push_str(section_title(level));
        output.push('\n');
        output.push('\n');

        for entry in section {
            output.push_str(&render_entry(entry, repo));
            output.push('\n');
        }
    }

    output
}

/// One package's contribution to a release pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageUpdate {
    pub package: String,
    pub version: Version,
    pub body: String,
}

/// Combines per-package release sections into one pull-request description.
#[must_use]
pub fn render_pull_request_description(updates: &[PackageUpdate]) -> String {
    let mut output = String::from("# Releases\n");

    for update in updates {
        output.push('\n');
        output.push_str(&format!("## {}@{}\n\n", update.package, update.version));

        // The per-package body opens with its own "## <version>" header,
        // which the combined document replaces.
        let body = update
            .body
            .lines()
            .skip_while(|line| line.starts_with("## ") || line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        output.push_str(&body);
        output.push('\n');
    }

    output
}
