//! Parses GitHub folder URLs into a [`RepositoryRef`].

use super::RepositoryRef;
use crate::errors::Result;
use once_cell::sync::Lazy;
use regex::Regex;

/// The components of a `https://github.com/<owner>/<repo>/tree/<branch>/<path>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTreeUrl {
    /// Repository owner (user or organisation).
    pub owner: String,
    /// Repository name, without a `.git` suffix.
    pub repo: String,
    /// The branch segment that follows `/tree/`.
    pub branch: String,
    /// Directory segments after the branch.
    pub segments: Vec<String>,
}

impl ParsedTreeUrl {
    /// The REST API base for this repository.
    pub fn api_base(&self) -> String {
        format!("https://api.github.com/repos/{}/{}", self.owner, self.repo)
    }

    /// Converts to a validated [`RepositoryRef`].
    pub fn into_repository_ref(self) -> Result<RepositoryRef> {
        RepositoryRef::new(&self.api_base(), &self.branch, self.segments)
    }
}

/// Regex for GitHub folder URLs: `.../tree/branch/path`
static GITHUB_TREE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/([^/]+)/([^/]+)/tree/([^/]+)/(.+?)/?$").unwrap()
});

/// Parses a GitHub folder URL.
///
/// The branch is taken to be the single segment after `/tree/`; branch names
/// containing `/` cannot be expressed this way and need `--branch` instead.
/// A URL that points at the repository root (no directory after the branch)
/// is rejected, since there is nothing to descend into.
///
/// # Examples
/// ```
/// use geosite_files::repo::parse_github_tree_url;
///
/// let parsed = parse_github_tree_url(
///     "https://github.com/MetaCubeX/meta-rules-dat/tree/meta/geo/geosite",
/// )
/// .unwrap();
/// assert_eq!(parsed.branch, "meta");
/// assert_eq!(parsed.segments, vec!["geo", "geosite"]);
/// assert_eq!(parsed.api_base(), "https://api.github.com/repos/MetaCubeX/meta-rules-dat");
/// ```
pub fn parse_github_tree_url(url: &str) -> Option<ParsedTreeUrl> {
    let caps = GITHUB_TREE_URL_RE.captures(url.trim())?;
    let owner = caps.get(1)?.as_str().to_string();
    let repo = caps.get(2)?.as_str().trim_end_matches(".git").to_string();
    let branch = caps.get(3)?.as_str().to_string();
    let segments: Vec<String> = caps
        .get(4)?
        .as_str()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if repo.is_empty() || segments.is_empty() {
        return None;
    }
    Some(ParsedTreeUrl {
        owner,
        repo,
        branch,
        segments,
    })
}
