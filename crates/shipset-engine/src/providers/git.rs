use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use shipset_core::{Author, ChangeRef};
use shipset_git::{FileChange, Repository};

use crate::config::CHANGESET_DIR;
use crate::traits::{ChangeAttribution, DiffProvider, HostingClient, MetadataSource};
use crate::Result;

static PR_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:#|pull request #)(\d+)").expect("valid regex"));

static CO_AUTHORED_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Co-authored-by:\s*(.+?)\s*<(.+?)>\s*$").expect("valid regex"));

pub struct GitDiffProvider;

impl GitDiffProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitDiffProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffProvider for GitDiffProvider {
    fn changed_files_since(&self, project_root: &Path, base: &str) -> Result<Vec<FileChange>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.changed_files_since(base)?)
    }
}

/// Resolves authors and references from the commit that introduced each
/// changeset file: PR number from the commit subject, author from the
/// hosting platform when the lookup succeeds, the commit's display name
/// otherwise, co-authors from `Co-authored-by:` trailers.
pub struct GitMetadataSource<H> {
    project_root: PathBuf,
    hosting: H,
}

impl<H: HostingClient> GitMetadataSource<H> {
    #[must_use]
    pub fn new(project_root: &Path, hosting: H) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            hosting,
        }
    }

    fn primary_author(&self, pr: Option<u64>, commit_author: &str) -> Result<Author> {
        if let Some(number) = pr {
            if let Some(login) = self.hosting.pr_author(number)? {
                return Ok(Author::login(login));
            }
            debug!(pr = number, "hosting lookup failed, using commit author");
        }
        Ok(Author::display_name(commit_author))
    }
}

impl<H: HostingClient> MetadataSource for GitMetadataSource<H> {
    fn attribution(&self, source_id: &str) -> Result<Option<ChangeAttribution>> {
        let repo = Repository::open(&self.project_root)?;
        let path = Path::new(CHANGESET_DIR).join(source_id);

        let Some(commit) = repo.introducing_commit(&path)? else {
            debug!(source_id, "no introducing commit found");
            return Ok(None);
        };

        let pr = extract_pr_number(&commit.message);
        let primary = self.primary_author(pr, &commit.author_name)?;

        let mut authors = vec![primary.clone()];
        for co_author in extract_co_authors(&commit.message) {
            if co_author.dedup_key() != primary.dedup_key() {
                authors.push(co_author);
            }
        }

        Ok(Some(ChangeAttribution {
            reference: Some(ChangeRef {
                pull_request: pr,
                commit: Some(commit.sha),
            }),
            authors,
        }))
    }
}

fn extract_pr_number(message: &str) -> Option<u64> {
    PR_NUMBER
        .captures(message)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_co_authors(message: &str) -> Vec<Author> {
    CO_AUTHORED_BY
        .captures_iter(message)
        .filter_map(|captures| captures.get(1))
        .map(|m| Author::display_name(m.as_str()))
        .collect()
}
