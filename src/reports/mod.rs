//! Report generation for comparison results.
//!
//! Two formats are supported:
//! - HTML: one page per archive pair plus a clustered defect summary page
//! - JSON: the same trees serialized for programmatic consumers
//!
//! # Security
//!
//! Class, member and annotation names are taken verbatim from the compared
//! archives. Every piece of dynamic text goes through the [`escape`] module
//! before it is embedded in HTML.

pub mod escape;
mod html;
mod json;

pub use html::{HtmlReporter, REPORT_CSS};
pub use json::JsonReporter;

use crate::defects::SummaryReport;
use crate::error::{AbiCmpError, Result};
use crate::pipeline::ArchiveReport;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format for reports.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Browsable HTML pages
    #[default]
    Html,
    /// Structured JSON output
    Json,
}

impl ReportFormat {
    /// File extension of reports in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Trait for report generators
pub trait ReportGenerator: Send + Sync {
    /// Render the report of one archive pair
    fn generate_archive_report(&self, report: &ArchiveReport) -> Result<String>;

    /// Render the clustered defect summary of a run
    fn generate_summary_report(&self, summary: &SummaryReport) -> Result<String>;

    /// Write an archive report to a writer
    fn write_archive_report(&self, report: &ArchiveReport, writer: &mut dyn Write) -> Result<()> {
        let content = self.generate_archive_report(report)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write a summary report to a writer
    fn write_summary_report(&self, summary: &SummaryReport, writer: &mut dyn Write) -> Result<()> {
        let content = self.generate_summary_report(summary)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

pub(crate) fn json_error(err: &serde_json::Error) -> AbiCmpError {
    AbiCmpError::report(
        "serializing report",
        crate::error::ReportErrorKind::JsonSerializationError(err.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_format() {
        assert_eq!(create_reporter(ReportFormat::Html).format(), ReportFormat::Html);
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
    }

    #[test]
    fn test_format_extension_and_serde() {
        assert_eq!(ReportFormat::Json.extension(), "json");
        assert_eq!(ReportFormat::Html.to_string(), "html");
        let parsed: ReportFormat = serde_json::from_str("\"json\"").expect("valid");
        assert_eq!(parsed, ReportFormat::Json);
    }
}
