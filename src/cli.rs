// src/cli.rs

use crate::config::OutputFormat;
use crate::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_PREVIEW, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY_MS,
    DEFAULT_TIMEOUT_SECS,
};
use clap::Parser;

/// Lists every file under a nested directory of a GitHub repository branch.
///
/// geosite-files walks branch -> root tree -> each directory segment through the
/// git-tree API and fetches the last directory recursively in a single call, so
/// listings larger than the contents API's 1,000-entry limit come back complete.
/// The list is summarised by extension, naming category and provider, and saved
/// as plain text (with .yaml/.list/.mrs subsets) or JSON.
///
/// Set GITHUB_TOKEN to authenticate and avoid the anonymous rate limit.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // --- Output Options ---
    /// Name of the primary output file [default: complete_geosite_files.txt, or .json with --format json].
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<String>,

    /// Directory for all output files; created if it does not exist.
    #[arg(short = 'd', long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: String,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging (RUST_LOG still takes precedence).
    #[arg(short = 'v', long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    // --- Repository Options ---
    /// Repository API base URL [default: https://api.github.com/repos/MetaCubeX/meta-rules-dat].
    #[arg(long, value_name = "URL")]
    pub repo_api: Option<String>,

    /// Branch to list [default: meta].
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Directory segments to descend from the repository root [default: geo geosite].
    #[arg(short = 'p', long, value_name = "SEGMENT", num_args = 1..)]
    pub path: Option<Vec<String>>,

    /// Take repository, branch and directory from a GitHub folder URL
    /// (https://github.com/<owner>/<repo>/tree/<branch>/<path>).
    #[arg(long, value_name = "GITHUB_TREE_URL", conflicts_with_all = ["repo_api", "branch", "path"])]
    pub from_url: Option<String>,

    // --- Network Options ---
    /// Total attempts per request when the network fails (first try included).
    #[arg(long, value_name = "N", default_value_t = DEFAULT_RETRIES)]
    pub retries: u32,

    /// Base backoff delay in milliseconds; doubles after every failed attempt.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_RETRY_DELAY_MS)]
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    // --- Report Options ---
    /// Number of file names to print after the statistics.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PREVIEW)]
    pub preview: usize,

    /// Do not print the statistics report.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub no_report: bool,
}
