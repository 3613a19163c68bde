use url::Url;

use crate::error::ChangelogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forge {
    GitHub,
    GitLab,
    Bitbucket,
    Gitea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub forge: Forge,
    pub owner: String,
    pub repo: String,
    pub base_url: Url,
}

impl RepositoryInfo {
    /// Parses repository coordinates out of a remote URL. Accepts https URLs
    /// and the scp-like `git@host:owner/repo.git` form git remotes commonly
    /// use.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError` if the URL is invalid or missing the
    /// owner/name path segments.
    pub fn from_remote_url(url_str: &str) -> Result<Self, ChangelogError> {
        let normalized = normalize_remote(url_str);

        let url = Url::parse(&normalized).map_err(|source| ChangelogError::UrlParse {
            url: url_str.to_string(),
            source,
        })?;

        let host = url.host_str().ok_or_else(|| ChangelogError::UrlParse {
            url: url_str.to_string(),
            source: url::ParseError::EmptyHost,
        })?;

        let forge = detect_forge(host);
        let (owner, repo) = extract_owner_repo(&url)?;

        let base_url =
            Url::parse(&format!("https://{host}")).map_err(|source| ChangelogError::UrlParse {
                url: url_str.to_string(),
                source,
            })?;

        Ok(Self {
            forge,
            owner,
            repo,
            base_url,
        })
    }

    #[must_use]
    pub fn pull_request_url(&self, number: u64) -> String {
        let segment = match self.forge {
            Forge::GitHub => "pull",
            Forge::GitLab => "-/merge_requests",
            Forge::Bitbucket => "pull-requests",
            Forge::Gitea => "pulls",
        };
        format!(
            "{}{}/{}/{}/{}",
            self.base_url, self.owner, self.repo, segment, number
        )
    }

    #[must_use]
    pub fn commit_url(&self, hash: &str) -> String {
        let segment = match self.forge {
            Forge::GitHub | Forge::Gitea => "commit",
            Forge::GitLab => "-/commit",
            Forge::Bitbucket => "commits",
        };
        format!(
            "{}{}/{}/{}/{}",
            self.base_url, self.owner, self.repo, segment, hash
        )
    }
}

/// Turns `git@host:owner/repo.git` and `ssh://git@host/owner/repo.git` into
/// https URLs so one parser handles every remote form.
fn normalize_remote(remote: &str) -> String {
    if let Some(rest) = remote.strip_prefix("git@") {
        if let Some((host, path)) = rest.split_once(':') {
            return format!("https://{host}/{path}");
        }
    }
    if let Some(rest) = remote.strip_prefix("ssh://git@") {
        return format!("https://{rest}");
    }
    remote.to_string()
}

fn detect_forge(host: &str) -> Forge {
    let host_lower = host.to_lowercase();

    if host_lower == "github.com" || host_lower.ends_with(".github.com") {
        Forge::GitHub
    } else if host_lower == "gitlab.com"
        || host_lower.starts_with("gitlab.")
        || host_lower.contains(".gitlab.")
    {
        Forge::GitLab
    } else if host_lower == "bitbucket.org" || host_lower.ends_with(".bitbucket.org") {
        Forge::Bitbucket
    } else if host_lower == "codeberg.org" || host_lower.starts_with("gitea.") {
        Forge::Gitea
    } else {
        Forge::GitHub
    }
}

fn extract_owner_repo(url: &Url) -> Result<(String, String), ChangelogError> {
    let path = url.path().trim_start_matches('/').trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() < 2 {
        return Err(ChangelogError::InvalidRepositoryPath {
            url: url.to_string(),
        });
    }

    Ok((segments[0].to_string(), segments[1].to_string()))
}
