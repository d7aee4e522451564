//! Repository locator: parses a user-supplied string into an owner/repo
//! identity. Accepts either a bare `owner/repo` pair or a github.com URL;
//! never touches the network.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Grammar for the bare `owner/repo` form. Owners allow alphanumerics and
/// hyphens; repository names additionally allow dots and underscores.
static OWNER_REPO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+/[A-Za-z0-9-._]+$").expect("owner/repo pattern is valid")
});

/// A normalized repository identity. Derived once from a raw locator
/// string and replaced wholesale on a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoIdentity {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Error)]
#[error("invalid repository locator {input:?}: expected a GitHub URL or an owner/repo string")]
pub struct LocatorError {
    pub input: String,
}

/// Parses a locator string into a [`RepoIdentity`].
///
/// Two grammars are accepted: a bare `owner/repo` pair, or a URL whose
/// host is exactly `github.com` with at least two non-empty path segments
/// (`https://` is assumed when the scheme is missing; trailing path
/// segments are ignored). Anything else is rejected.
pub fn locate(input: &str) -> Result<RepoIdentity, LocatorError> {
    if OWNER_REPO.is_match(input) {
        let (owner, repo) = input
            .split_once('/')
            .expect("grammar guarantees a separator");
        return Ok(RepoIdentity {
            owner: owner.to_string(),
            repo: repo.to_string(),
        });
    }

    let candidate: Cow<'_, str> = if input.starts_with("http") {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("https://{input}"))
    };

    if let Ok(parsed) = Url::parse(&candidate) {
        if parsed.host_str() == Some("github.com") {
            let segments: Vec<&str> = parsed
                .path_segments()
                .map(|segments| segments.filter(|s| !s.is_empty()).collect())
                .unwrap_or_default();
            if segments.len() >= 2 {
                return Ok(RepoIdentity {
                    owner: segments[0].to_string(),
                    repo: segments[1].to_string(),
                });
            }
        }
    }

    Err(LocatorError {
        input: input.to_string(),
    })
}
