use std::process::Command;

use tracing::debug;

use crate::traits::HostingClient;
use crate::Result;

/// PR author lookup through the `gh` CLI. Any failure (missing binary, no
/// auth, unknown PR) degrades to `None` so callers fall back to commit
/// metadata instead of aborting a release over a credit line.
pub struct GhCli {
    owner: String,
    repo: String,
}

impl GhCli {
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl HostingClient for GhCli {
    fn pr_author(&self, number: u64) -> Result<Option<String>> {
        let endpoint = format!("repos/{}/{}/pulls/{number}", self.owner, self.repo);

        let output = match Command::new("gh")
            .args(["api", &endpoint, "--jq", ".user.login"])
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "gh CLI unavailable");
                return Ok(None);
            }
        };

        if !output.status.success() {
            debug!(pr = number, "gh api call failed");
            return Ok(None);
        }

        let login = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if login.is_empty() {
            return Ok(None);
        }

        Ok(Some(login))
    }
}

/// Hosting client for repositories without a resolvable forge; every lookup
/// falls through to commit metadata.
pub struct NoHosting;

impl HostingClient for NoHosting {
    fn pr_author(&self, _number: u64) -> Result<Option<String>> {
        Ok(None)
    }
}
