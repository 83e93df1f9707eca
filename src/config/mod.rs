//! Defines the core `Config` struct and related types for application configuration.
//!
//! This module consolidates all the settings parsed and validated from the CLI
//! (or set programmatically through [`ConfigBuilder`]), making them available
//! to the rest of the application in a structured and type-safe manner.

use crate::repo::RepositoryRef;
use crate::tree::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::ConfigBuilder;
mod builder;
mod validation;

/// On-disk format of the primary output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One path per line, plus `.yaml` / `.list` / `.mrs` subset files.
    #[default]
    Text,
    /// A single JSON document with the count, the list, a timestamp and the source.
    Json,
}

impl OutputFormat {
    /// Primary filename used when none is configured.
    pub fn default_filename(self) -> &'static str {
        match self {
            OutputFormat::Text => crate::constants::DEFAULT_TEXT_FILENAME,
            OutputFormat::Json => crate::constants::DEFAULT_JSON_FILENAME,
        }
    }
}

/// Where and how the file list is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory receiving every output file; created if missing.
    pub dir: PathBuf,
    /// Name of the primary file inside `dir`.
    pub filename: String,
    /// Text or JSON.
    pub format: OutputFormat,
}

impl OutputConfig {
    /// Full path of the primary file.
    pub fn primary_path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// What the human-readable report on stdout contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// Print the statistics report at all.
    pub enabled: bool,
    /// How many file names to echo after the statistics.
    pub preview: usize,
}

/// Runtime configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which repository, branch and directory to list.
    pub repository: RepositoryRef,
    /// Retry behaviour for each request.
    pub retry: RetryPolicy,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Output destination and format.
    pub output: OutputConfig,
    /// Report settings.
    pub report: ReportConfig,
}

impl Config {
    /// Creates a default `Config` for testing purposes.
    #[doc(hidden)]
    pub fn new_for_test(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository: RepositoryRef::default(),
            retry: RetryPolicy::no_retry(),
            timeout: Duration::from_secs(5),
            output: OutputConfig {
                dir: output_dir.into(),
                filename: crate::constants::DEFAULT_TEXT_FILENAME.to_string(),
                format: OutputFormat::Text,
            },
            report: ReportConfig {
                enabled: false,
                preview: 0,
            },
        }
    }
}
