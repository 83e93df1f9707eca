//! Identifies which repository, branch and directory to list.

use crate::errors::{Error, Result};
use ::url::Url;

pub mod url;

pub use self::url::{parse_github_tree_url, ParsedTreeUrl};

/// The fixed location to resolve: a repository API base, a branch and the
/// directory segments to descend from the root tree.
///
/// # Examples
///
/// ```
/// use geosite_files::repo::RepositoryRef;
///
/// let repo = RepositoryRef::new(
///     "https://api.github.com/repos/MetaCubeX/meta-rules-dat",
///     "meta",
///     vec!["geo".to_string(), "geosite".to_string()],
/// )
/// .unwrap();
/// assert_eq!(repo.directory(), "geo/geosite");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository API base, e.g. `https://api.github.com/repos/owner/name`.
    pub api_base: Url,
    /// Branch whose tip commit is listed.
    pub branch: String,
    /// Directory names descended from the root tree, outermost first.
    pub segments: Vec<String>,
}

impl RepositoryRef {
    /// Parses and validates the parts of a repository reference.
    ///
    /// # Errors
    /// Returns `Error::Config` if the URL is not an absolute http(s) URL, the
    /// branch is empty, or the segment list is empty or contains an empty
    /// name or a name with a `/`.
    pub fn new(api_base: &str, branch: &str, segments: Vec<String>) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| Error::Config(format!("invalid repository API URL '{}': {}", api_base, e)))?;
        if !matches!(api_base.scheme(), "http" | "https") || api_base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "repository API URL must be http(s), got '{}'",
                api_base
            )));
        }
        if branch.trim().is_empty() {
            return Err(Error::Config("branch name must not be empty".to_string()));
        }
        if segments.is_empty() {
            return Err(Error::Config(
                "at least one directory segment is required".to_string(),
            ));
        }
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || s.contains('/'))
        {
            return Err(Error::Config(format!(
                "directory segment '{}' must be a single non-empty name",
                bad
            )));
        }
        Ok(Self {
            api_base,
            branch: branch.to_string(),
            segments,
        })
    }

    /// The listed directory, segments joined with `/`.
    pub fn directory(&self) -> String {
        self.segments.join("/")
    }

    /// Label recorded as `source` in JSON output.
    pub fn source_label(&self) -> String {
        format!(
            "{}@{}:{}",
            self.api_base.as_str().trim_end_matches('/'),
            self.branch,
            self.directory()
        )
    }
}

impl Default for RepositoryRef {
    fn default() -> Self {
        use crate::constants::{DEFAULT_BRANCH, DEFAULT_REPO_API, DEFAULT_SEGMENTS};
        Self {
            api_base: Url::parse(DEFAULT_REPO_API).expect("default API URL is valid"),
            branch: DEFAULT_BRANCH.to_string(),
            segments: DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
