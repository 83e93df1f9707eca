// src/main.rs

use anyhow::Result;
use clap::Parser;
use geosite_files::cli::Cli;
use geosite_files::config::ConfigBuilder;
#[cfg(feature = "progress")]
use geosite_files::progress::IndicatifProgress;
use geosite_files::progress::ProgressReporter;
use geosite_files::run;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. RUST_LOG wins; otherwise info, or debug with --verbose.
    let default_level = if cli.verbose {
        "geosite_files=debug"
    } else {
        "geosite_files=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    log::info!("Starting geosite-files v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Parsed arguments: {:?}", cli);

    // --- Configuration ---
    let config = match ConfigBuilder::from_cli(cli).build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Show a spinner only when stderr is a TTY.
    let progress_reporter: Option<Arc<dyn ProgressReporter>> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Some(Arc::new(IndicatifProgress::new()))
            } else {
                None
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            None
        }
    };

    // --- Execution & Error Handling ---
    match run(&config, progress_reporter) {
        Ok(outcome) => {
            log::info!(
                "Done: {} files listed, {} output file(s) written.",
                outcome.files.len(),
                outcome.written.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
