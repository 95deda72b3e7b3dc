//! Compare command handler.
//!
//! Implements the `compare` subcommand for one pair of exploded archives.

use crate::config::AppConfig;
use crate::pipeline::{
    exit_codes, write_output, ArchiveReport, DirArchive, OutputTarget, ARCHIVE_SUFFIX,
};
use crate::reports::create_reporter;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the compare command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_compare(
    config: &AppConfig,
    archive1: &Path,
    archive2: &Path,
    output_file: Option<PathBuf>,
) -> Result<i32> {
    config.ensure_valid()?;
    let comparer = config.archive_comparer()?;

    let a1 = DirArchive::open(archive1)
        .with_context(|| format!("Failed to open {}", archive1.display()))?;
    let a2 = DirArchive::open(archive2)
        .with_context(|| format!("Failed to open {}", archive2.display()))?;

    let report = comparer.compare(&archive_header(archive1), &a1, &a2)?;
    log_report(&report);

    let reporter = create_reporter(config.output.format);
    let content = reporter.generate_archive_report(&report)?;
    write_output(&content, &OutputTarget::from_option(output_file))?;

    Ok(if report.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::DIFFERENCES_FOUND
    })
}

/// Report title for an archive: its file name without the archive suffix.
fn archive_header(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
        .replace(ARCHIVE_SUFFIX, "")
}

fn log_report(report: &ArchiveReport) {
    tracing::info!(
        "{} classes differ, {} missing in {}, {} missing in {}",
        report.class_diffs.len(),
        report.missing_in_1.len(),
        report.archive1,
        report.missing_in_2.len(),
        report.archive2
    );
    if !report.failures.is_empty() {
        tracing::warn!("{} entries could not be compared", report.failures.len());
    }
}
