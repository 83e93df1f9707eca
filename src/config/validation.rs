// src/config/validation.rs

use super::{ConfigBuilder, OutputFormat};
use crate::constants::SUBSET_FILES;
use crate::errors::{Error, Result};

/// Validates combinations of options that clap cannot express on its own,
/// and that matter when the builder is used directly.
pub(super) fn validate_builder_options(builder: &ConfigBuilder) -> Result<()> {
    if builder.from_url.is_some()
        && (builder.repo_api.is_some() || builder.branch.is_some() || builder.segments.is_some())
    {
        return Err(Error::Config(
            "--from-url cannot be combined with --repo-api, --branch or --path".to_string(),
        ));
    }
    if builder.retries == Some(0) {
        return Err(Error::Config("--retries must be at least 1".to_string()));
    }
    if builder.timeout_secs == Some(0) {
        return Err(Error::Config("--timeout must be at least 1 second".to_string()));
    }
    if let Some(dir) = &builder.output_dir {
        if dir.trim().is_empty() {
            return Err(Error::Config("--output-dir must not be empty".to_string()));
        }
    }
    Ok(())
}

/// Checks that the primary filename is a plain name that will not be
/// overwritten by one of the subset files.
pub(super) fn validate_filename(filename: &str, format: OutputFormat) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(Error::Config("--output must not be empty".to_string()));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(Error::Config(format!(
            "--output '{}' must be a file name; use --output-dir for the directory",
            filename
        )));
    }
    if format == OutputFormat::Text {
        if let Some((_, clash)) = SUBSET_FILES.iter().find(|(_, name)| *name == filename) {
            return Err(Error::Config(format!(
                "--output '{}' would be overwritten by the subset file of the same name",
                clash
            )));
        }
    }
    Ok(())
}
