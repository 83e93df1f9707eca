//! `geosite-files` is a library and command-line tool that lists every file
//! under a nested directory of one branch of a GitHub repository.
//!
//! GitHub's contents endpoint stops at 1,000 entries per directory. This crate
//! walks the git-tree endpoint instead (branch → root tree → each directory
//! segment) and fetches the final directory with `recursive=1`, which returns
//! the whole subtree in one response.
//!
//! The run is a short, strictly sequential pipeline:
//! 1.  **Resolve**: [`tree::TreeResolver`] turns a [`repo::RepositoryRef`] into a sorted list of file paths.
//! 2.  **Classify**: [`classify::analyze`] tallies extensions, naming categories and providers.
//! 3.  **Persist**: [`output::persist`] writes the list as text (plus suffix subsets) or JSON.
//!
//! # Example: Library Usage
//!
//! ```
//! use geosite_files::classify::analyze;
//! use geosite_files::config::{OutputConfig, OutputFormat};
//! use geosite_files::output::persist;
//! use tempfile::tempdir;
//!
//! // A list as the resolver would return it.
//! let files: Vec<String> = ["category-ads.yaml", "google@cn.list", "misc.mrs"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let report = analyze(&files);
//! assert_eq!(report.categories.china, 1);
//!
//! let dir = tempdir().unwrap();
//! let output = OutputConfig {
//!     dir: dir.path().to_path_buf(),
//!     filename: "all.txt".to_string(),
//!     format: OutputFormat::Text,
//! };
//! let written = persist(&files, &output, "example").unwrap();
//! assert_eq!(written.len(), 4);
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod output;
pub mod progress;
pub mod repo;
pub mod tree;

pub use classify::{analyze, AnalysisReport};
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use errors::{Error, Result};
pub use repo::RepositoryRef;
pub use tree::{GitHubTreeApi, TreeApi, TreeResolver};

use crate::progress::ProgressReporter;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The sorted file list.
    pub files: Vec<String>,
    /// Statistics over `files`.
    pub report: AnalysisReport,
    /// Paths written to disk, primary file first.
    pub written: Vec<PathBuf>,
}

/// Runs the full pipeline against `api`, printing the report to `report_out`.
///
/// Nothing is written to disk unless resolution succeeds.
///
/// # Errors
/// Propagates resolution errors and `Error::FileWrite` from persistence.
pub fn execute(
    config: &Config,
    api: &dyn TreeApi,
    progress: Option<Arc<dyn ProgressReporter>>,
    report_out: &mut dyn Write,
) -> Result<RunOutcome> {
    log::info!(
        "Listing '{}' on branch '{}' of {}",
        config.repository.directory(),
        config.repository.branch,
        config.repository.api_base
    );

    let files = TreeResolver::new(api, config.retry)
        .with_progress(progress)
        .resolve(&config.repository)?;

    let report = classify::analyze(&files);

    let written = output::persist(
        &files,
        &config.output,
        &config.repository.source_label(),
    )?;

    if config.report.enabled {
        // The files are already on disk; a broken stdout should not fail the run.
        let printed = output::write_report(report_out, &report, &files, config.report.preview)
            .and_then(|_| {
                writeln!(report_out)?;
                for path in &written {
                    writeln!(report_out, "Saved: {}", path.display())?;
                }
                report_out.flush()
            });
        if let Err(e) = printed {
            log::warn!("Could not print the report: {}", e);
        }
    }

    Ok(RunOutcome {
        files,
        report,
        written,
    })
}

/// Runs the full pipeline against the GitHub API described by `config`,
/// printing the report to stdout.
///
/// # Errors
/// See [`execute`]; also fails if the HTTP client cannot be built.
pub fn run(config: &Config, progress: Option<Arc<dyn ProgressReporter>>) -> Result<RunOutcome> {
    let api = GitHubTreeApi::new(config.repository.api_base.clone(), config.timeout)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    execute(config, &api, progress, &mut handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportFailure;
    use crate::tree::{ApiResponse, Endpoint};
    use std::fs;
    use tempfile::tempdir;

    /// Serves a fixed meta → geo → geosite layout.
    struct StaticApi {
        branch_status: u16,
        leaf_truncated: bool,
    }

    impl StaticApi {
        fn healthy() -> Self {
            Self {
                branch_status: 200,
                leaf_truncated: false,
            }
        }
    }

    impl TreeApi for StaticApi {
        fn get(&self, endpoint: &Endpoint) -> std::result::Result<ApiResponse, TransportFailure> {
            let (status, body) = match endpoint {
                Endpoint::Branch(_) => (self.branch_status, r#"{"commit":{"sha":"c1"}}"#),
                Endpoint::Tree { sha, .. } if sha == "c1" => {
                    (200, r#"{"tree":[{"path":"geo","type":"tree","sha":"g1"}]}"#)
                }
                Endpoint::Tree { sha, .. } if sha == "g1" => {
                    (200, r#"{"tree":[{"path":"geosite","type":"tree","sha":"s1"}]}"#)
                }
                Endpoint::Tree { .. } if self.leaf_truncated => (
                    200,
                    r#"{"tree":[{"path":"a.yaml","type":"blob","sha":"1"}],"truncated":true}"#,
                ),
                Endpoint::Tree { .. } => (
                    200,
                    r#"{"tree":[
                        {"path":"misc.mrs","type":"blob","sha":"3"},
                        {"path":"google@cn.list","type":"blob","sha":"2"},
                        {"path":"category-ads.yaml","type":"blob","sha":"1"},
                        {"path":"noext","type":"blob","sha":"4"}
                    ]}"#,
                ),
            };
            Ok(ApiResponse {
                status,
                body: body.to_string(),
            })
        }
    }

    #[test]
    fn test_execute_success_writes_and_reports() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let mut config = Config::new_for_test(temp.path());
        config.report.enabled = true;
        config.report.preview = 10;

        let mut out = Vec::new();
        let outcome = execute(&config, &StaticApi::healthy(), None, &mut out)?;

        assert_eq!(
            outcome.files,
            vec!["category-ads.yaml", "google@cn.list", "misc.mrs", "noext"]
        );
        assert_eq!(outcome.report.total, 4);
        assert_eq!(outcome.written.len(), 4);

        let primary = fs::read_to_string(temp.path().join("complete_geosite_files.txt"))?;
        assert_eq!(primary, "category-ads.yaml\ngoogle@cn.list\nmisc.mrs\nnoext\n");

        let printed = String::from_utf8(out)?;
        assert!(printed.contains("Total files: 4"));
        assert!(printed.contains("Saved: "));
        Ok(())
    }

    #[test]
    fn test_execute_branch_404_writes_nothing() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let out_dir = temp.path().join("out");
        let config = Config::new_for_test(&out_dir);

        let api = StaticApi {
            branch_status: 404,
            leaf_truncated: false,
        };
        let mut out = Vec::new();
        let result = execute(&config, &api, None, &mut out);

        assert!(matches!(
            result,
            Err(Error::BranchNotFound { status: 404, .. })
        ));
        assert!(!out_dir.exists());
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_execute_without_report_prints_nothing() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let config = Config::new_for_test(temp.path());
        let mut out = Vec::new();
        execute(&config, &StaticApi::healthy(), None, &mut out)?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn test_execute_truncated_listing_writes_nothing() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let out_dir = temp.path().join("out");
        let mut config = Config::new_for_test(&out_dir);
        config.report.enabled = true;

        let api = StaticApi {
            branch_status: 200,
            leaf_truncated: true,
        };
        let mut out = Vec::new();
        let result = execute(&config, &api, None, &mut out);

        assert!(matches!(result, Err(Error::TruncatedListing { .. })));
        assert!(!out_dir.exists());
        assert!(out.is_empty());
        Ok(())
    }
}
