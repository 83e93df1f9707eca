// src/output/report.rs

use crate::classify::{AnalysisReport, Category};
use crate::constants::{CONTENTS_API_LIMIT, TOP_PROVIDERS};
use std::io::{self, Write};

const RULE: &str = "======================================================================";

/// Writes the human-readable statistics for `report`, followed by the first
/// `preview` entries of `files`.
///
/// Percentages are omitted entirely when the report is empty.
pub fn write_report(
    writer: &mut dyn Write,
    report: &AnalysisReport,
    files: &[String],
    preview: usize,
) -> io::Result<()> {
    writeln!(writer, "{}", RULE)?;
    writeln!(writer, "File list report")?;
    writeln!(writer, "{}", RULE)?;
    writeln!(writer, "Total files: {}", report.total)?;

    if report.total > 0 {
        writeln!(writer)?;
        writeln!(writer, "By extension:")?;
        for (ext, count) in report.extensions_by_count() {
            writeln!(
                writer,
                "  .{:<8} {:>6} ({:5.1}%)",
                ext,
                count,
                report.percentage(count)
            )?;
        }

        let categories: Vec<(Category, usize)> = Category::ALL
            .iter()
            .map(|c| (*c, report.categories.get(*c)))
            .filter(|(_, count)| *count > 0)
            .collect();
        if !categories.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Categories:")?;
            for (category, count) in categories {
                writeln!(
                    writer,
                    "  {:<12} {:>6} ({:5.1}%)",
                    category.name(),
                    count,
                    report.percentage(count)
                )?;
            }
        }

        let providers = report.top_providers(TOP_PROVIDERS);
        if !providers.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Providers (top {}):", TOP_PROVIDERS)?;
            for (provider, count) in providers {
                writeln!(
                    writer,
                    "  {:<12} {:>6} ({:5.1}%)",
                    provider,
                    count,
                    report.percentage(count)
                )?;
            }
        }
    }

    write_preview(writer, files, preview)?;

    if files.len() > CONTENTS_API_LIMIT {
        writeln!(writer)?;
        writeln!(
            writer,
            "{} more files than the contents API's {}-entry limit would return.",
            files.len() - CONTENTS_API_LIMIT,
            CONTENTS_API_LIMIT
        )?;
    }
    Ok(())
}

fn write_preview(writer: &mut dyn Write, files: &[String], preview: usize) -> io::Result<()> {
    if preview == 0 || files.is_empty() {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "First {} files:", preview.min(files.len()))?;
    let width = preview.min(files.len()).to_string().len();
    for (i, file) in files.iter().take(preview).enumerate() {
        writeln!(writer, "  {:>width$}. {}", i + 1, file, width = width)?;
    }
    if files.len() > preview {
        writeln!(writer, "  ... and {} more", files.len() - preview)?;
    }
    Ok(())
}
