//! Defines application-specific error types.
//!
//! Every failure the tool can hit while resolving, classifying or saving the
//! file list is a variant of [`Error`]. The library returns it everywhere;
//! `main` turns it into an exit status.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A network-level failure reported by a [`TreeApi`](crate::tree::TreeApi)
/// implementation: connection refused, DNS failure, timeout, truncated body.
///
/// These are the only failures the retry wrapper will try again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportFailure(pub String);

impl From<reqwest::Error> for TransportFailure {
    fn from(e: reqwest::Error) -> Self {
        TransportFailure(e.to_string())
    }
}

/// Errors produced by `geosite-files`.
#[derive(Error, Debug)]
pub enum Error {
    // --- Network ---
    /// The request never produced an HTTP response, even after retrying.
    #[error("Request to '{endpoint}' failed after {attempts} attempt(s): {source}")]
    Transport {
        /// The endpoint path that was requested.
        endpoint: String,
        /// How many attempts were made before giving up.
        attempts: u32,
        /// The last transport failure.
        #[source]
        source: TransportFailure,
    },

    // --- HTTP status ---
    /// The branch lookup returned a non-success status.
    #[error("Branch '{branch}' could not be fetched: HTTP {status}")]
    BranchNotFound {
        /// The branch that was requested.
        branch: String,
        /// The HTTP status code returned.
        status: u16,
    },

    /// A tree lookup returned a non-success status.
    #[error("Tree '{sha}' could not be fetched: HTTP {status}")]
    TreeFetch {
        /// The tree (or commit) identifier that was requested.
        sha: String,
        /// The HTTP status code returned.
        status: u16,
    },

    // --- Response shape ---
    /// The response body was not the JSON shape we expected.
    #[error("Malformed response from '{endpoint}': {reason}")]
    MalformedResponse {
        /// The endpoint path that was requested.
        endpoint: String,
        /// What was wrong with the body.
        reason: String,
    },

    /// A configured directory segment is missing from its parent tree.
    #[error("Directory '{segment}' not found in '{parent}'")]
    PathSegmentNotFound {
        /// The segment that was searched for.
        segment: String,
        /// Display form of the parent path ("/" for the repository root).
        parent: String,
    },

    /// The recursive listing hit the API's size cap, so the file list is incomplete.
    #[error("Listing of '{directory}' was truncated by the API; refusing to save an incomplete list")]
    TruncatedListing {
        /// The directory whose recursive listing was truncated.
        directory: String,
    },

    // --- Output ---
    /// Writing an output file (or creating its directory) failed.
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    // --- Configuration ---
    /// Invalid configuration value or combination.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The HTTP status carried by status-class errors, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BranchNotFound { status, .. } | Error::TreeFetch { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Helper function to create an `Error::FileWrite` with path context.
pub fn write_error_with_path<P: AsRef<Path>>(source: std::io::Error, path: P) -> Error {
    Error::FileWrite {
        path: path.as_ref().to_path_buf(),
        source,
    }
}
