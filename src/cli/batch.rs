//! Batch command handler.
//!
//! Implements the `compare-archives` subcommand for two directory trees.

use crate::config::AppConfig;
use crate::pipeline::{exit_codes, BatchOutcome, JobOutcome};
use anyhow::Result;
use std::path::Path;

/// Run a batch comparison, returning the desired exit code.
///
/// Failed archive pairs take precedence over differences.
pub fn run_compare_archives(config: &AppConfig, dir1: &Path, dir2: &Path) -> Result<i32> {
    let runner = config.batch_runner()?;
    let outcome = runner.run(dir1, dir2)?;
    log_outcome(&outcome);
    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &BatchOutcome) -> i32 {
    if outcome.failed_jobs() > 0 {
        exit_codes::ERROR
    } else if outcome.has_differences() {
        exit_codes::DIFFERENCES_FOUND
    } else {
        exit_codes::SUCCESS
    }
}

fn log_outcome(outcome: &BatchOutcome) {
    for job in &outcome.jobs {
        match job {
            JobOutcome::Compared {
                name,
                report_path: Some(path),
                differences,
            } => tracing::info!("{name}: {differences} differences, report at {}", path.display()),
            JobOutcome::Compared { name, .. } => tracing::debug!("{name}: no differences"),
            JobOutcome::Failed { name, reason } => tracing::warn!("{name}: not compared: {reason}"),
        }
    }
    tracing::info!(
        "{} archive pairs, {} failed, {} defects ({} unique)",
        outcome.jobs.len(),
        outcome.failed_jobs(),
        outcome.summary.total_defects(),
        outcome.summary.total_unique_defects()
    );
    if let Some(path) = &outcome.summary_path {
        tracing::info!("Summary written to {}", path.display());
    }
}
