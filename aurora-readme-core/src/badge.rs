//! Badge construction: static image badges for repository metrics,
//! rendered as markdown image syntax pointing at the shields host.

use crate::locator::RepoIdentity;

/// Host marker used both in badge URLs and by the assembly engine's
/// badge-line detection heuristic.
pub const BADGE_HOST: &str = "img.shields.io";

/// Repository metrics a badge can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    License,
    Stars,
    Forks,
    IssuesOpen,
    IssuesPrOpen,
    Contributors,
    LastCommit,
    RepoSize,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 8] = [
        BadgeKind::License,
        BadgeKind::Stars,
        BadgeKind::Forks,
        BadgeKind::IssuesOpen,
        BadgeKind::IssuesPrOpen,
        BadgeKind::Contributors,
        BadgeKind::LastCommit,
        BadgeKind::RepoSize,
    ];

    /// Path segment on the badge host (e.g. `issues-pr-open`).
    pub fn slug(self) -> &'static str {
        match self {
            BadgeKind::License => "license",
            BadgeKind::Stars => "stars",
            BadgeKind::Forks => "forks",
            BadgeKind::IssuesOpen => "issues-open",
            BadgeKind::IssuesPrOpen => "issues-pr-open",
            BadgeKind::Contributors => "contributors",
            BadgeKind::LastCommit => "last-commit",
            BadgeKind::RepoSize => "repo-size",
        }
    }

    /// Visual style applied when the caller does not pick one. Stars and
    /// forks render in the `social` style; the rest use the host default.
    pub fn default_style(self) -> Option<BadgeStyle> {
        match self {
            BadgeKind::Stars | BadgeKind::Forks => Some(BadgeStyle::Social),
            _ => None,
        }
    }
}

/// Visual styles understood by the badge host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Flat,
    FlatSquare,
    Plastic,
    ForTheBadge,
    Social,
}

impl BadgeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeStyle::Flat => "flat",
            BadgeStyle::FlatSquare => "flat-square",
            BadgeStyle::Plastic => "plastic",
            BadgeStyle::ForTheBadge => "for-the-badge",
            BadgeStyle::Social => "social",
        }
    }
}

/// Builds the markdown image reference for one badge:
/// `![<kind>](https://img.shields.io/github/<kind>/<owner>/<repo>[?style=<style>])`.
pub fn badge_markdown(kind: BadgeKind, repo: &RepoIdentity, style: Option<BadgeStyle>) -> String {
    let mut url = format!(
        "https://{BADGE_HOST}/github/{}/{}/{}",
        kind.slug(),
        repo.owner,
        repo.repo
    );
    if let Some(style) = style {
        url.push_str("?style=");
        url.push_str(style.as_str());
    }
    format!("![{}]({url})", kind.slug())
}
