use indexmap::IndexSet;
use serde::Deserialize;

use shipset_core::{BumpLevel, ChangesetRecord};

use crate::error::MalformedChangeset;

pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";

const MAX_INPUT_SIZE: usize = 100 * 1024 * 1024;

#[derive(Deserialize)]
struct FrontMatter {
    bump: Option<String>,
    #[serde(default)]
    packages: Vec<String>,
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s)
}

fn find_closing_delimiter(content: &str) -> Option<usize> {
    if content.starts_with(FRONT_MATTER_DELIMITER) {
        return Some(0);
    }
    if let Some(pos) = content.find("\r\n---") {
        return Some(pos + 2);
    }
    if let Some(pos) = content.find("\n---") {
        return Some(pos + 1);
    }
    None
}

fn extract_front_matter(content: &str) -> Result<(&str, &str), MalformedChangeset> {
    let trimmed = content.trim_start();

    if !trimmed.starts_with(FRONT_MATTER_DELIMITER) {
        return Err(MalformedChangeset::MissingOpeningDelimiter);
    }

    let after_opening = &trimmed[FRONT_MATTER_DELIMITER.len()..];
    let after_opening = strip_line_ending(after_opening);

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return Err(MalformedChangeset::MissingClosingDelimiter);
    };

    let yaml_content = &after_opening[..closing_pos];
    let yaml_content = yaml_content.trim_end_matches('\r');
    if yaml_content.trim().is_empty() {
        return Err(MalformedChangeset::EmptyFrontMatter);
    }

    let after_closing = &after_opening[closing_pos + FRONT_MATTER_DELIMITER.len()..];
    let body = strip_line_ending(after_closing);

    Ok((yaml_content, body))
}

/// Parses one changeset file into a record.
///
/// # Errors
///
/// Returns `MalformedChangeset` when the front matter is missing or invalid,
/// the bump token is not one of major/minor/patch, no packages are listed, or
/// the summary is empty.
#[must_use = "parsing result should be handled"]
pub fn parse_record(source_id: &str, content: &str) -> Result<ChangesetRecord, MalformedChangeset> {
    if content.len() > MAX_INPUT_SIZE {
        return Err(MalformedChangeset::InputTooLarge {
            max_bytes: MAX_INPUT_SIZE,
        });
    }

    let (yaml_content, body) = extract_front_matter(content)?;

    let front_matter: FrontMatter = serde_yml::from_str(yaml_content)?;

    let bump: BumpLevel = front_matter
        .bump
        .ok_or(MalformedChangeset::MissingBumpLevel)?
        .parse()?;

    let packages: IndexSet<String> = front_matter
        .packages
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if packages.is_empty() {
        return Err(MalformedChangeset::NoPackages);
    }

    let summary = body.trim();
    if summary.is_empty() {
        return Err(MalformedChangeset::EmptySummary);
    }

    Ok(ChangesetRecord::new(
        source_id,
        packages.into_iter().collect(),
        bump,
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_package_with_summary() {
        let content = "---\nbump: patch\npackages:\n  - my-package\n---\nFix critical bug in authentication flow.\n";

        let record = parse_record("fix.md", content).expect("should parse");
        assert_eq!(record.source_id, "fix.md");
        assert_eq!(record.packages, vec!["my-package"]);
        assert_eq!(record.bump, BumpLevel::Patch);
        assert_eq!(record.summary, "Fix critical bug in authentication flow.");
        assert!(record.authors.is_empty());
        assert!(record.reference.is_none());
    }

    #[test]
    fn multiple_packages_preserve_order() {
        let content = "---\nbump: major\npackages:\n  - zebra\n  - apple\n---\nBreaking change to the shared API.\n";

        let record = parse_record("breaking.md", content).expect("should parse");
        assert_eq!(record.packages, vec!["zebra", "apple"]);
        assert_eq!(record.bump, BumpLevel::Major);
    }

    #[test]
    fn duplicate_packages_are_collapsed() {
        let content = "---\nbump: minor\npackages:\n  - pkg\n  - pkg\n---\nAdd feature.\n";

        let record = parse_record("dup.md", content).expect("should parse");
        assert_eq!(record.packages, vec!["pkg"]);
    }

    #[test]
    fn bump_token_is_case_insensitive() {
        let content = "---\nbump: MINOR\npackages:\n  - pkg\n---\nAdd feature.\n";

        let record = parse_record("a.md", content).expect("should parse");
        assert_eq!(record.bump, BumpLevel::Minor);
    }

    #[test]
    fn multiline_summary_kept_verbatim() {
        let content = "---\nbump: minor\npackages:\n  - pkg\n---\nThis is a multiline summary.\n\n- Feature one\n- Feature two\n";

        let record = parse_record("multi.md", content).expect("should parse");
        assert!(record.summary.contains("multiline summary"));
        assert!(record.summary.contains("- Feature two"));
    }

    #[test]
    fn delimiter_inside_summary_does_not_break_parsing() {
        let content = "---\nbump: patch\npackages:\n  - pkg\n---\nSummary with --- inside text.\n";

        let record = parse_record("d.md", content).expect("should parse");
        assert!(record.summary.contains("---"));
    }

    #[test]
    fn windows_line_endings() {
        let content = "---\r\nbump: patch\r\npackages:\r\n  - my-package\r\n---\r\nWindows style summary.\r\n";

        let record = parse_record("win.md", content).expect("should parse");
        assert_eq!(record.packages, vec!["my-package"]);
        assert!(record.summary.contains("Windows style summary"));
    }

    #[test]
    fn no_trailing_newline() {
        let content = "---\nbump: patch\npackages:\n  - pkg\n---\nSummary without trailing newline";

        let record = parse_record("n.md", content).expect("should parse");
        assert_eq!(record.summary, "Summary without trailing newline");
    }

    #[test]
    fn unicode_package_name_and_summary() {
        let content = "---\nbump: minor\npackages:\n  - über-package\n---\nДобавлена поддержка Unicode 🎉\n";

        let record = parse_record("u.md", content).expect("should parse");
        assert_eq!(record.packages, vec!["über-package"]);
        assert!(record.summary.contains("🎉"));
    }

    #[test]
    fn error_missing_opening_delimiter() {
        let content = "bump: patch\n---\nSome summary.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::MissingOpeningDelimiter));
    }

    #[test]
    fn error_missing_closing_delimiter() {
        let content = "---\nbump: patch\nSome summary without closing delimiter.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::MissingClosingDelimiter));
    }

    #[test]
    fn error_empty_front_matter() {
        let content = "---\n---\nSome summary.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::EmptyFrontMatter));
    }

    #[test]
    fn error_missing_bump_level() {
        let content = "---\npackages:\n  - pkg\n---\nSome summary.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::MissingBumpLevel));
    }

    #[test]
    fn error_unknown_bump_token() {
        let content = "---\nbump: huge\npackages:\n  - pkg\n---\nSome summary.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::UnknownBumpToken(_)));
    }

    #[test]
    fn error_no_packages() {
        let content = "---\nbump: patch\npackages: []\n---\nSome summary.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::NoPackages));
    }

    #[test]
    fn error_packages_key_absent() {
        let content = "---\nbump: patch\n---\nSome summary.\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::NoPackages));
    }

    #[test]
    fn error_whitespace_only_summary() {
        let content = "---\nbump: patch\npackages:\n  - pkg\n---\n   \n\t\n";

        let err = parse_record("x.md", content).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::EmptySummary));
    }

    #[test]
    fn error_input_too_large() {
        let huge = "a".repeat(MAX_INPUT_SIZE + 1);

        let err = parse_record("x.md", &huge).expect_err("should fail");
        assert!(matches!(err, MalformedChangeset::InputTooLarge { .. }));
    }
}
