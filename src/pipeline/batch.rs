//! Directory batch comparison.
//!
//! Walks two directory trees in parallel, pairs archive directories by name,
//! compares every pair on a bounded rayon pool and writes one report per pair
//! plus a clustered summary. Job results are folded into the summary in one
//! sequential step after all jobs have finished.

use super::archive::DirArchive;
use super::compare::{ArchiveComparer, ArchiveReport};
use super::output::write_file;
use crate::defects::{DefectReport, SummaryReport};
use crate::error::{AbiCmpError, ArchiveErrorKind, Result};
use crate::reports::{create_reporter, ReportFormat, ReportGenerator};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory-name suffix marking an exploded archive.
pub const ARCHIVE_SUFFIX: &str = ".jar";

/// Result of one archive-pair job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    Compared {
        name: String,
        /// Set when a report was written
        report_path: Option<PathBuf>,
        differences: usize,
    },
    Failed {
        name: String,
        reason: String,
    },
}

impl JobOutcome {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Compared { name, .. } | Self::Failed { name, .. } => name,
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Everything a batch run produced.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub jobs: Vec<JobOutcome>,
    pub summary: SummaryReport,
    pub summary_path: Option<PathBuf>,
}

impl BatchOutcome {
    /// Whether any job found differences.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        self.jobs
            .iter()
            .any(|job| matches!(job, JobOutcome::Compared { differences, .. } if *differences > 0))
    }

    #[must_use]
    pub fn failed_jobs(&self) -> usize {
        self.jobs.iter().filter(|job| job.is_failed()).count()
    }
}

/// One discovered archive pair.
#[derive(Debug, Clone)]
struct BatchJob {
    name: String,
    header: String,
    path1: PathBuf,
    path2: PathBuf,
    report_path: PathBuf,
}

/// Runs archive-pair comparisons for two directory trees.
pub struct BatchRunner {
    archives: ArchiveComparer,
    report_dir: PathBuf,
    format: ReportFormat,
    reporter: Box<dyn ReportGenerator>,
    id_mapping: Option<(String, String)>,
    threads: usize,
    write_summary: bool,
    include_unchanged: bool,
}

impl BatchRunner {
    pub fn new(archives: ArchiveComparer, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            archives,
            report_dir: report_dir.into(),
            format: ReportFormat::Html,
            reporter: create_reporter(ReportFormat::Html),
            id_mapping: None,
            threads: 0,
            write_summary: true,
            include_unchanged: false,
        }
    }

    #[must_use]
    pub fn format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self.reporter = create_reporter(format);
        self
    }

    /// Substrings swapped when mapping a tree-1 name to its tree-2 counterpart.
    #[must_use]
    pub fn id_mapping(mut self, id1: impl Into<String>, id2: impl Into<String>) -> Self {
        self.id_mapping = Some((id1.into(), id2.into()));
        self
    }

    /// Worker count; `0` lets rayon decide.
    #[must_use]
    pub const fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    #[must_use]
    pub const fn write_summary(mut self, enabled: bool) -> Self {
        self.write_summary = enabled;
        self
    }

    #[must_use]
    pub const fn include_unchanged(mut self, enabled: bool) -> Self {
        self.include_unchanged = enabled;
        self
    }

    /// Compare every archive pair under `dir1` and `dir2`.
    ///
    /// Unreadable pairs become failed jobs. Errors writing a report or the
    /// summary are returned after every job has run.
    pub fn run(&self, dir1: &Path, dir2: &Path) -> Result<BatchOutcome> {
        for dir in [dir1, dir2] {
            if !dir.is_dir() {
                return Err(AbiCmpError::archive(
                    "opening batch input",
                    ArchiveErrorKind::NotADirectory(dir.to_path_buf()),
                ));
            }
        }
        tracing::info!("Comparing directories: {:?}, {:?}", dir1, dir2);

        let mut jobs = Vec::new();
        let mut name_index = HashMap::new();
        self.discover(dir1, dir2, "", &mut name_index, &mut jobs)?;
        tracing::info!(jobs = jobs.len(), "Discovered archive pairs");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| AbiCmpError::config(format!("cannot start worker pool: {e}")))?;
        let results: Vec<Result<(JobOutcome, DefectReport)>> =
            pool.install(|| jobs.par_iter().map(|job| self.run_job(job)).collect());

        let mut summary = SummaryReport::new();
        let mut outcomes = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok((outcome, defects)) => {
                    if let JobOutcome::Failed { name, reason } = &outcome {
                        summary.add_failed_job(name.clone(), reason.clone());
                    }
                    summary.add(defects);
                    outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::error!("{e}");
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }

        let summary_path = if self.write_summary {
            let path = self.summary_path();
            let content = self.reporter.generate_summary_report(&summary)?;
            write_file(&path, &content)?;
            Some(path)
        } else {
            None
        };

        tracing::info!(
            jobs = outcomes.len(),
            total_defects = summary.total_defects(),
            unique_defects = summary.total_unique_defects(),
            "Done"
        );
        Ok(BatchOutcome {
            jobs: outcomes,
            summary,
            summary_path,
        })
    }

    fn summary_path(&self) -> PathBuf {
        let file = match self.format {
            ReportFormat::Html => "SUMMARY.html",
            ReportFormat::Json => "summary.json",
        };
        self.report_dir.join(file)
    }

    fn map_name(&self, name: &str) -> String {
        match &self.id_mapping {
            Some((id1, id2)) if !id1.is_empty() => name.replace(id1.as_str(), id2),
            _ => name.to_string(),
        }
    }

    fn job_header(&self, name: &str) -> String {
        let stripped = match &self.id_mapping {
            Some((id1, _)) if !id1.is_empty() => name.replace(id1.as_str(), ""),
            _ => name.to_string(),
        };
        stripped.replace(ARCHIVE_SUFFIX, "")
    }

    fn discover(
        &self,
        subdir1: &Path,
        subdir2: &Path,
        prefix: &str,
        name_index: &mut HashMap<String, usize>,
        jobs: &mut Vec<BatchJob>,
    ) -> Result<()> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(subdir1)
            .map_err(|e| AbiCmpError::io(subdir1, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();

        for path1 in entries {
            let Some(file_name) = path1.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            // Plain files only matter when they claim to be archives
            if !path1.is_dir() && !file_name.ends_with(ARCHIVE_SUFFIX) {
                continue;
            }
            let path2 = subdir2.join(self.map_name(&file_name));
            let relative = if prefix.is_empty() {
                file_name.clone()
            } else {
                format!("{prefix}/{file_name}")
            };

            if file_name.ends_with(ARCHIVE_SUFFIX) {
                let index = name_index.entry(file_name.clone()).or_insert(0);
                *index += 1;
                let header = self.job_header(&file_name);
                let report_path = self.report_dir.join(format!(
                    "{header}-REPORT-{index}.{}",
                    self.format.extension()
                ));
                jobs.push(BatchJob {
                    name: relative,
                    header,
                    path1,
                    path2,
                    report_path,
                });
            } else {
                // Archives below a subdirectory without counterpart still
                // become jobs; they fail on the missing tree-2 side.
                if !path2.is_dir() {
                    tracing::debug!("No counterpart for subdirectory {:?}", path1);
                }
                self.discover(&path1, &path2, &relative, name_index, jobs)?;
            }
        }
        Ok(())
    }

    fn run_job(&self, job: &BatchJob) -> Result<(JobOutcome, DefectReport)> {
        let failed = |reason: String| {
            tracing::warn!(archive = %job.name, "Archive pair not compared: {reason}");
            Ok((
                JobOutcome::Failed {
                    name: job.name.clone(),
                    reason,
                },
                DefectReport::new(),
            ))
        };

        if !job.path1.is_dir() {
            return failed("not an exploded archive directory".to_string());
        }
        if !job.path2.exists() {
            return failed(format!("no counterpart at {}", job.path2.display()));
        }
        let opened = DirArchive::open(&job.path1)
            .and_then(|a1| DirArchive::open(&job.path2).map(|a2| (a1, a2)));
        let (archive1, archive2) = match opened {
            Ok(pair) => pair,
            Err(e) => return failed(e.cause()),
        };

        let mut report = match self.archives.compare(&job.header, &archive1, &archive2) {
            Ok(report) => report,
            Err(e) if e.is_config() => return Err(e),
            Err(e) => return failed(e.cause()),
        };
        let defects = std::mem::take(&mut report.defects);

        let report_path = if !report.is_empty() || self.include_unchanged {
            self.write_report(&job.report_path, &report)?;
            Some(job.report_path.clone())
        } else {
            None
        };

        Ok((
            JobOutcome::Compared {
                name: job.name.clone(),
                report_path,
                differences: report.total_diffs,
            },
            defects,
        ))
    }

    fn write_report(&self, path: &Path, report: &ArchiveReport) -> Result<()> {
        let content = self.reporter.generate_archive_report(report)?;
        write_file(path, &content)
    }
}
