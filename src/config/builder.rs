// src/config/builder.rs

use super::validation::{validate_builder_options, validate_filename};
use super::{Config, OutputConfig, OutputFormat, ReportConfig};
use crate::cli::Cli;
use crate::constants::{
    DEFAULT_BRANCH, DEFAULT_OUTPUT_DIR, DEFAULT_PREVIEW, DEFAULT_REPO_API, DEFAULT_RETRIES,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_SEGMENTS, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{Error, Result};
use crate::repo::{parse_github_tree_url, RepositoryRef};
use crate::tree::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;

/// A builder for creating a `Config` programmatically.
///
/// Every setter is optional; unset values fall back to the defaults used by
/// the command line.
///
/// # Examples
///
/// ```
/// use geosite_files::config::{ConfigBuilder, OutputFormat};
///
/// let config = ConfigBuilder::new()
///     .branch("meta")
///     .segments(vec!["geo".to_string(), "geosite".to_string()])
///     .output_dir("out")
///     .format(OutputFormat::Json)
///     .retries(5)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.output.filename, "complete_geosite_files.json");
/// assert_eq!(config.retry.max_attempts, 5);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    pub(super) repo_api: Option<String>,
    pub(super) branch: Option<String>,
    pub(super) segments: Option<Vec<String>>,
    pub(super) from_url: Option<String>,
    pub(super) output_file: Option<String>,
    pub(super) output_dir: Option<String>,
    pub(super) format: Option<OutputFormat>,
    pub(super) retries: Option<u32>,
    pub(super) retry_delay_ms: Option<u64>,
    pub(super) timeout_secs: Option<u64>,
    pub(super) preview: Option<usize>,
    pub(super) no_report: Option<bool>,
}

impl ConfigBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            repo_api: cli.repo_api,
            branch: cli.branch,
            segments: cli.path,
            from_url: cli.from_url,
            output_file: cli.output,
            output_dir: Some(cli.output_dir),
            format: Some(cli.format),
            retries: Some(cli.retries),
            retry_delay_ms: Some(cli.retry_delay_ms),
            timeout_secs: Some(cli.timeout),
            preview: Some(cli.preview),
            no_report: Some(cli.no_report),
        }
    }

    /// Sets the repository API base, e.g. `https://api.github.com/repos/owner/name`.
    pub fn repo_api(mut self, url: impl Into<String>) -> Self {
        self.repo_api = Some(url.into());
        self
    }

    /// Sets the branch to list.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the directory segments to descend, outermost first.
    pub fn segments(mut self, segments: Vec<String>) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Takes repository, branch and directory from a GitHub folder URL.
    pub fn from_url(mut self, url: impl Into<String>) -> Self {
        self.from_url = Some(url.into());
        self
    }

    /// Sets the primary output filename.
    pub fn output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = Some(name.into());
        self
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the total attempts per request.
    pub fn retries(mut self, attempts: u32) -> Self {
        self.retries = Some(attempts);
        self
    }

    /// Sets the backoff base delay in milliseconds.
    pub fn retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = Some(ms);
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets how many file names the report echoes.
    pub fn preview(mut self, count: usize) -> Self {
        self.preview = Some(count);
        self
    }

    /// Suppresses the statistics report.
    pub fn no_report(mut self, no_report: bool) -> Self {
        self.no_report = Some(no_report);
        self
    }

    /// Validates the settings and builds the final `Config`.
    ///
    /// # Errors
    /// Returns `Error::Config` for conflicting options, an unparsable folder
    /// URL, an invalid repository reference, zero retries or a zero timeout,
    /// or a bad output filename.
    pub fn build(self) -> Result<Config> {
        validate_builder_options(&self)?;

        let repository = self.resolve_repository()?;

        let format = self.format.unwrap_or_default();
        let filename = self
            .output_file
            .unwrap_or_else(|| format.default_filename().to_string());
        validate_filename(&filename, format)?;

        let retry = RetryPolicy::new(
            self.retries.unwrap_or(DEFAULT_RETRIES),
            Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
        );

        let config = Config {
            repository,
            retry,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            output: OutputConfig {
                dir: PathBuf::from(
                    self.output_dir
                        .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
                ),
                filename,
                format,
            },
            report: ReportConfig {
                enabled: !self.no_report.unwrap_or(false),
                preview: self.preview.unwrap_or(DEFAULT_PREVIEW),
            },
        };
        log::debug!("Built configuration: {:?}", config);
        Ok(config)
    }

    fn resolve_repository(&self) -> Result<RepositoryRef> {
        if let Some(url) = &self.from_url {
            let parsed = parse_github_tree_url(url).ok_or_else(|| {
                Error::Config(format!(
                    "'{}' is not a GitHub folder URL (expected https://github.com/<owner>/<repo>/tree/<branch>/<path>)",
                    url
                ))
            })?;
            log::debug!("Using repository from folder URL: {:?}", parsed);
            return parsed.into_repository_ref();
        }

        let segments = self.segments.clone().unwrap_or_else(|| {
            DEFAULT_SEGMENTS.iter().map(|s| s.to_string()).collect()
        });
        RepositoryRef::new(
            self.repo_api.as_deref().unwrap_or(DEFAULT_REPO_API),
            self.branch.as_deref().unwrap_or(DEFAULT_BRANCH),
            segments,
        )
    }
}
