//! Resolves a nested directory of a branch into a flat, sorted list of files.
//!
//! The contents endpoint stops listing at 1,000 entries per directory. The
//! git-tree endpoint has no such cap when asked for `recursive=1`, so the
//! resolver walks branch → root tree → each configured directory using
//! single-level tree fetches, and only the last directory is fetched
//! recursively.

use crate::errors::{Error, Result, TransportFailure};
use crate::progress::ProgressReporter;
use crate::repo::RepositoryRef;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

pub mod api;
pub mod retry;

pub use api::GitHubTreeApi;
pub use retry::{with_retry, RetryPolicy};

/// One request the resolver can make, relative to the repository API base.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `branches/{name}`
    Branch(String),
    /// `git/trees/{sha}`, with `?recursive=1` when `recursive` is set.
    Tree {
        /// Tree or commit identifier.
        sha: String,
        /// Ask for the fully expanded subtree.
        recursive: bool,
    },
}

impl Endpoint {
    /// URL path segments below the API base.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Branch(name) => {
                let mut segments = vec!["branches"];
                segments.extend(name.split('/'));
                segments
            }
            Endpoint::Tree { sha, .. } => vec!["git", "trees", sha.as_str()],
        }
    }

    /// Query parameters for this endpoint.
    pub fn query(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Endpoint::Tree {
                recursive: true, ..
            } => Some(("recursive", "1")),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segments().join("/"))?;
        if let Some((key, value)) = self.query() {
            write!(f, "?{}={}", key, value)?;
        }
        Ok(())
    }
}

/// A raw HTTP answer: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl ApiResponse {
    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam between the resolver and the network.
///
/// Implementations perform exactly one GET per call. They report a
/// [`TransportFailure`] only when no HTTP response was obtained; any response,
/// whatever its status, is returned as `Ok`.
pub trait TreeApi {
    /// Performs a GET for `endpoint`.
    fn get(&self, endpoint: &Endpoint) -> std::result::Result<ApiResponse, TransportFailure>;
}

/// Kind of a tree entry.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
    /// Anything else, e.g. a submodule `commit`.
    #[serde(other)]
    Other,
}

/// An entry of a tree response.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Path relative to the tree that was fetched.
    pub path: String,
    /// Blob, tree or other.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Object identifier.
    pub sha: String,
}

/// Body of a `git/trees/{sha}` response.
#[derive(Deserialize, Debug, Clone)]
pub struct TreeListing {
    /// The entries, in API order.
    pub tree: Vec<TreeNode>,
    /// Set by the API when a recursive listing hit its size cap.
    #[serde(default)]
    pub truncated: bool,
}

impl TreeListing {
    /// Finds the directory entry named `name`.
    pub fn find_dir(&self, name: &str) -> Option<&TreeNode> {
        self.tree
            .iter()
            .find(|node| node.path == name && node.kind == NodeKind::Tree)
    }

    /// Paths of all blob entries, sorted lexicographically.
    pub fn sorted_blob_paths(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .tree
            .iter()
            .filter(|node| node.kind == NodeKind::Blob)
            .map(|node| node.path.clone())
            .collect();
        files.sort();
        files
    }
}

/// Body of a `branches/{name}` response, reduced to what we read.
#[derive(Deserialize, Debug)]
struct BranchInfo {
    commit: CommitRef,
}

#[derive(Deserialize, Debug)]
struct CommitRef {
    sha: String,
}

/// Walks the configured path and returns every file beneath it.
///
/// # Examples
///
/// ```
/// use geosite_files::errors::TransportFailure;
/// use geosite_files::repo::RepositoryRef;
/// use geosite_files::tree::{ApiResponse, Endpoint, RetryPolicy, TreeApi, TreeResolver};
///
/// struct Canned;
/// impl TreeApi for Canned {
///     fn get(&self, endpoint: &Endpoint) -> Result<ApiResponse, TransportFailure> {
///         let body = match endpoint {
///             Endpoint::Branch(_) => r#"{"commit":{"sha":"c1"}}"#,
///             Endpoint::Tree { sha, .. } if sha == "c1" => {
///                 r#"{"tree":[{"path":"rules","type":"tree","sha":"t1"}]}"#
///             }
///             Endpoint::Tree { .. } => {
///                 r#"{"tree":[{"path":"b.yaml","type":"blob","sha":"x"},
///                             {"path":"a.list","type":"blob","sha":"y"}]}"#
///             }
///         };
///         Ok(ApiResponse { status: 200, body: body.to_string() })
///     }
/// }
///
/// let repo = RepositoryRef::new("https://api.example.com/repos/o/r", "main", vec!["rules".into()]).unwrap();
/// let files = TreeResolver::new(&Canned, RetryPolicy::no_retry()).resolve(&repo).unwrap();
/// assert_eq!(files, vec!["a.list", "b.yaml"]);
/// ```
pub struct TreeResolver<'a> {
    api: &'a dyn TreeApi,
    policy: RetryPolicy,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl<'a> TreeResolver<'a> {
    /// Creates a resolver over `api` with the given retry policy.
    pub fn new(api: &'a dyn TreeApi, policy: RetryPolicy) -> Self {
        Self {
            api,
            policy,
            progress: None,
        }
    }

    /// Attaches a progress reporter that is told about each request.
    pub fn with_progress(mut self, progress: Option<Arc<dyn ProgressReporter>>) -> Self {
        self.progress = progress;
        self
    }

    /// Resolves `repo` into the sorted list of blob paths under its directory.
    ///
    /// Any failure aborts the whole resolution; no partial list is returned.
    ///
    /// # Errors
    /// * `Error::Transport` when a request keeps failing at the network level.
    /// * `Error::BranchNotFound` / `Error::TreeFetch` on non-2xx statuses.
    /// * `Error::MalformedResponse` when a body does not have the expected shape.
    /// * `Error::PathSegmentNotFound` when a directory is missing from its parent.
    /// * `Error::TruncatedListing` when the API could not return the whole subtree.
    pub fn resolve(&self, repo: &RepositoryRef) -> Result<Vec<String>> {
        let result = self.walk(repo);
        if result.is_err() {
            if let Some(p) = &self.progress {
                p.abandon();
            }
        }
        result
    }

    fn walk(&self, repo: &RepositoryRef) -> Result<Vec<String>> {
        let total_steps = repo.segments.len() as u64 + 2;
        let mut step = 0u64;
        if let Some(p) = &self.progress {
            p.set_length(total_steps);
        }

        // 1. Branch tip
        self.begin_step(step, format!("Resolving branch '{}'...", repo.branch));
        let commit_sha = {
            let _span = tracing::info_span!("resolve_step", step = "branch").entered();
            self.fetch_branch_sha(&repo.branch)?
        };
        info!("Branch '{}' is at commit {}", repo.branch, short_sha(&commit_sha));
        step += 1;

        // 2. Root tree, then one level per segment
        let mut current_sha = commit_sha;
        let mut parent = String::from("/");
        for segment in &repo.segments {
            self.begin_step(step, format!("Looking for '{}' in {}...", segment, parent));
            let listing = {
                let _span = tracing::info_span!("resolve_step", step = "descend", dir = %parent)
                    .entered();
                self.fetch_tree(&current_sha, false)?
            };
            let node = listing
                .find_dir(segment)
                .ok_or_else(|| Error::PathSegmentNotFound {
                    segment: segment.clone(),
                    parent: parent.clone(),
                })?;
            debug!("Found directory '{}' ({})", segment, short_sha(&node.sha));
            current_sha = node.sha.clone();
            parent = if parent == "/" {
                segment.clone()
            } else {
                format!("{}/{}", parent, segment)
            };
            step += 1;
        }

        // 3. Leaf directory, fully expanded in one call
        self.begin_step(step, format!("Listing '{}' recursively...", parent));
        let listing = {
            let _span = tracing::info_span!("resolve_step", step = "recursive", dir = %parent)
                .entered();
            self.fetch_tree(&current_sha, true)?
        };
        if listing.truncated {
            return Err(Error::TruncatedListing { directory: parent });
        }
        let files = listing.sorted_blob_paths();
        info!("Found {} files under '{}'", files.len(), parent);

        if let Some(p) = &self.progress {
            p.set_position(total_steps);
            p.finish_with_message(format!("Found {} files", files.len()));
        }
        Ok(files)
    }

    fn begin_step(&self, step: u64, msg: String) {
        debug!("{}", msg);
        if let Some(p) = &self.progress {
            p.set_position(step);
            p.set_message(msg);
        }
    }

    /// Performs one GET through the retry policy.
    fn fetch(&self, endpoint: &Endpoint) -> Result<ApiResponse> {
        let label = endpoint.to_string();
        debug!("Fetching {}", label);
        let response = with_retry(&self.policy, &label, |_| self.api.get(endpoint))?;
        if response.status == 403 {
            warn!(
                "GitHub API answered 403 for '{}' (likely rate-limited). Set {} to raise the limit.",
                label,
                crate::constants::GITHUB_TOKEN_ENV
            );
        }
        Ok(response)
    }

    fn fetch_branch_sha(&self, branch: &str) -> Result<String> {
        let endpoint = Endpoint::Branch(branch.to_string());
        let response = self.fetch(&endpoint)?;
        if !response.is_success() {
            return Err(Error::BranchNotFound {
                branch: branch.to_string(),
                status: response.status,
            });
        }
        let info: BranchInfo = parse_body(&endpoint, &response.body)?;
        if info.commit.sha.is_empty() {
            return Err(Error::MalformedResponse {
                endpoint: endpoint.to_string(),
                reason: "empty commit.sha".to_string(),
            });
        }
        Ok(info.commit.sha)
    }

    fn fetch_tree(&self, sha: &str, recursive: bool) -> Result<TreeListing> {
        let endpoint = Endpoint::Tree {
            sha: sha.to_string(),
            recursive,
        };
        let response = self.fetch(&endpoint)?;
        if !response.is_success() {
            return Err(Error::TreeFetch {
                sha: sha.to_string(),
                status: response.status,
            });
        }
        parse_body(&endpoint, &response.body)
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(endpoint: &Endpoint, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}
