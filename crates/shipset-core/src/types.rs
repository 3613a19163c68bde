use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    pub const ALL: [Self; 3] = [Self::Major, Self::Minor, Self::Patch];
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized bump level '{token}' (expected major, minor or patch)")]
pub struct UnknownBumpToken {
    pub token: String,
}

impl FromStr for BumpLevel {
    type Err = UnknownBumpToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(UnknownBumpToken {
                token: s.to_string(),
            }),
        }
    }
}

/// How an author identity was obtained. Hosting logins are rendered as
/// `@login` mentions; display names from commit metadata are rendered bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    Login,
    DisplayName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub kind: AuthorKind,
}

impl Author {
    #[must_use]
    pub fn login(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AuthorKind::Login,
        }
    }

    #[must_use]
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AuthorKind::DisplayName,
        }
    }

    /// Normalized identity used for deduplication: case-insensitive,
    /// ignoring a leading `@`.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        self.name.trim_start_matches('@').to_lowercase()
    }

    #[must_use]
    pub fn mention(&self) -> String {
        match self.kind {
            AuthorKind::Login if !self.name.starts_with('@') => format!("@{}", self.name),
            _ => self.name.clone(),
        }
    }
}

/// Link target for a changelog citation. At least one side is populated by
/// the enrichment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRef {
    pub pull_request: Option<u64>,
    pub commit: Option<String>,
}

impl ChangeRef {
    #[must_use]
    pub fn pull_request(number: u64) -> Self {
        Self {
            pull_request: Some(number),
            commit: None,
        }
    }

    #[must_use]
    pub fn commit(hash: impl Into<String>) -> Self {
        Self {
            pull_request: None,
            commit: Some(hash.into()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pull_request.is_none() && self.commit.is_none()
    }
}

/// One committed change note, parsed from a single changeset file.
/// Immutable once parsed; `authors` and `reference` start empty and may be
/// attached by an enrichment step before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangesetRecord {
    /// Stable identifier of the originating file, used for dedup bookkeeping
    /// and for marking the record consumed.
    pub source_id: String,
    /// Ordered, deduplicated, non-empty set of affected packages.
    pub packages: Vec<String>,
    /// Minimum bump this record requires for each listed package.
    pub bump: BumpLevel,
    /// Free-text description, used verbatim in the changelog.
    pub summary: String,
    pub authors: Vec<Author>,
    pub reference: Option<ChangeRef>,
}

impl ChangesetRecord {
    #[must_use]
    pub fn new(
        source_id: impl Into<String>,
        packages: Vec<String>,
        bump: BumpLevel,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            packages,
            bump,
            summary: summary.into(),
            authors: Vec::new(),
            reference: None,
        }
    }
}

/// A known package. The version is carried verbatim from the manifest; the
/// bump resolver owns validating it, so a malformed version surfaces as a
/// resolution failure rather than aborting discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub manifest_path: std::path::PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_level_ordering_patch_is_smallest() {
        assert!(BumpLevel::Patch < BumpLevel::Minor);
        assert!(BumpLevel::Patch < BumpLevel::Major);
    }

    #[test]
    fn bump_level_ordering_major_is_largest() {
        assert!(BumpLevel::Major > BumpLevel::Minor);
        assert!(BumpLevel::Major > BumpLevel::Patch);
    }

    #[test]
    fn bump_level_max_returns_most_severe() {
        let bumps = [BumpLevel::Patch, BumpLevel::Major, BumpLevel::Minor];
        assert_eq!(bumps.iter().max(), Some(&BumpLevel::Major));
    }

    #[test]
    fn bump_level_from_str_is_case_insensitive() {
        assert_eq!("MAJOR".parse::<BumpLevel>(), Ok(BumpLevel::Major));
        assert_eq!("Minor".parse::<BumpLevel>(), Ok(BumpLevel::Minor));
        assert_eq!("patch".parse::<BumpLevel>(), Ok(BumpLevel::Patch));
    }

    #[test]
    fn bump_level_from_str_rejects_unknown_tokens() {
        let err = "huge".parse::<BumpLevel>().expect_err("should reject");
        assert_eq!(err.token, "huge");
    }

    #[test]
    fn bump_level_display_roundtrips_through_from_str() {
        for level in BumpLevel::ALL {
            assert_eq!(level.to_string().parse::<BumpLevel>(), Ok(level));
        }
    }

    #[test]
    fn author_dedup_key_ignores_case_and_at_prefix() {
        let a = Author::login("Alice");
        let b = Author::display_name("@alice");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn login_mention_gets_at_prefix() {
        assert_eq!(Author::login("alice").mention(), "@alice");
    }

    #[test]
    fn login_mention_does_not_double_prefix() {
        assert_eq!(Author::login("@alice").mention(), "@alice");
    }

    #[test]
    fn display_name_mention_stays_bare() {
        assert_eq!(Author::display_name("Alice Smith").mention(), "Alice Smith");
    }

    #[test]
    fn change_ref_is_empty_only_without_both_sides() {
        assert!(
            ChangeRef {
                pull_request: None,
                commit: None
            }
            .is_empty()
        );
        assert!(!ChangeRef::pull_request(12).is_empty());
        assert!(!ChangeRef::commit("abc1234").is_empty());
    }
}
