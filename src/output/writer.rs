// src/output/writer.rs

//! Persists the resolved file list.
//!
//! Every file is opened, fully written and closed on its own. A failure part
//! way through leaves the files written so far on disk.

use crate::config::{OutputConfig, OutputFormat};
use crate::constants::SUBSET_FILES;
use crate::errors::{write_error_with_path, Result};
use chrono::{SecondsFormat, Utc};
use log::{debug, info};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The JSON document written in [`OutputFormat::Json`] mode.
#[derive(Debug, Serialize)]
pub struct JsonListing<'a> {
    /// Number of entries in `files`.
    pub total_files: usize,
    /// The sorted file list.
    pub files: &'a [String],
    /// Generation time, RFC 3339 UTC.
    pub generated_at: String,
    /// Where the list came from (`api_base@branch:dir`).
    pub source: &'a str,
}

/// Writes `files` according to `output`, creating the directory first.
///
/// Text mode writes the primary list plus one subset file per entry of
/// [`SUBSET_FILES`]; JSON mode writes a single document.
///
/// # Returns
/// The paths written, primary file first.
///
/// # Errors
/// Returns `Error::FileWrite` for the first path that could not be created or written.
pub fn persist(files: &[String], output: &OutputConfig, source: &str) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&output.dir).map_err(|e| write_error_with_path(e, &output.dir))?;

    let primary = output.primary_path();
    let mut written = Vec::new();

    match output.format {
        OutputFormat::Text => {
            write_lines(&primary, files.iter())?;
            info!("Saved {} paths to {}", files.len(), primary.display());
            written.push(primary);

            for (suffix, name) in SUBSET_FILES {
                let subset = filter_by_suffix(files, suffix);
                let path = output.dir.join(name);
                write_lines(&path, subset.iter().copied())?;
                info!("Saved {} '{}' paths to {}", subset.len(), suffix, path.display());
                written.push(path);
            }
        }
        OutputFormat::Json => {
            let document = JsonListing {
                total_files: files.len(),
                files,
                generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
                source,
            };
            write_json(&primary, &document)?;
            info!("Saved {} paths to {}", files.len(), primary.display());
            written.push(primary);
        }
    }
    Ok(written)
}

/// The entries of `files` ending in `suffix`, in their original order.
pub fn filter_by_suffix<'a>(files: &'a [String], suffix: &str) -> Vec<&'a String> {
    files.iter().filter(|f| f.ends_with(suffix)).collect()
}

fn write_lines<'a, I>(path: &Path, lines: I) -> Result<()>
where
    I: Iterator<Item = &'a String>,
{
    debug!("Writing {}", path.display());
    let file = File::create(path).map_err(|e| write_error_with_path(e, path))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line).map_err(|e| write_error_with_path(e, path))?;
    }
    writer.flush().map_err(|e| write_error_with_path(e, path))
}

fn write_json(path: &Path, document: &JsonListing<'_>) -> Result<()> {
    debug!("Writing {}", path.display());
    let file = File::create(path).map_err(|e| write_error_with_path(e, path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)
        .map_err(|e| write_error_with_path(e.into(), path))?;
    writeln!(writer).map_err(|e| write_error_with_path(e, path))?;
    writer.flush().map_err(|e| write_error_with_path(e, path))
}
