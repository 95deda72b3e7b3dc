//! JSON report generator.

use super::{json_error, ReportFormat, ReportGenerator};
use crate::defects::SummaryReport;
use crate::error::Result;
use crate::pipeline::ArchiveReport;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, body: &T) -> Result<String> {
        let document = JsonDocument {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "abicmp".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                generated_at: Utc::now().to_rfc3339(),
            },
            report: body,
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.map_err(|e| json_error(&e))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_archive_report(&self, report: &ArchiveReport) -> Result<String> {
        self.render(report)
    }

    fn generate_summary_report(&self, summary: &SummaryReport) -> Result<String> {
        self.render(summary)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonDocument<'a, T: Serialize> {
    metadata: JsonReportMetadata,
    report: &'a T,
}

#[derive(Serialize)]
struct JsonReportMetadata {
    tool: ToolInfo,
    generated_at: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    version: String,
}
