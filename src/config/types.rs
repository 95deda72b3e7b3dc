//! Configuration types for abicmp runs.

use crate::diff::{CheckerConfiguration, ExceptionPolicies, DEFAULT_IGNORED_ANNOTATIONS};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Side titles, file-name mapping and parallelism
    pub comparison: ComparisonConfig,
    /// Checker selection
    pub checkers: CheckersConfig,
    /// Suppression heuristics
    pub policies: ExceptionPolicies,
    /// Report location and format
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// How the two sides are labelled and matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Column title of the first side
    pub header1: String,
    /// Column title of the second side
    pub header2: String,
    /// Substring of tree-1 file names replaced by `id2` to find the counterpart
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id1: Option<String>,
    /// Replacement for `id1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id2: Option<String>,
    /// Worker threads (0 = one per core)
    pub threads: usize,
    /// Annotation descriptors never reported as differences
    pub ignored_annotations: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            header1: "#1".to_string(),
            header2: "#2".to_string(),
            id1: None,
            id2: None,
            threads: 0,
            ignored_annotations: DEFAULT_IGNORED_ANNOTATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Which checkers run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckersConfig {
    /// When set, only these checkers run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Vec<String>>,
    /// Checkers switched off
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl CheckersConfig {
    /// Equivalent checker configuration. Names are validated when the
    /// comparer is built.
    #[must_use]
    pub fn to_configuration(&self) -> CheckerConfiguration {
        let base = match &self.enabled {
            Some(names) => CheckerConfiguration::enable_exclusively(names.iter().cloned()),
            None => CheckerConfiguration::all(),
        };
        base.disable(self.disabled.iter().cloned())
    }
}

/// Where and how reports are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving batch reports
    pub report_dir: PathBuf,
    /// Report format
    pub format: ReportFormat,
    /// Write the clustered defect summary after a batch
    pub summary: bool,
    /// Also write reports for archives without differences
    pub include_unchanged: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("abicmp-reports"),
            format: ReportFormat::Html,
            summary: true,
            include_unchanged: false,
        }
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn headers(mut self, header1: impl Into<String>, header2: impl Into<String>) -> Self {
        self.config.comparison.header1 = header1.into();
        self.config.comparison.header2 = header2.into();
        self
    }

    pub fn id_mapping(mut self, id1: impl Into<String>, id2: impl Into<String>) -> Self {
        self.config.comparison.id1 = Some(id1.into());
        self.config.comparison.id2 = Some(id2.into());
        self
    }

    pub const fn threads(mut self, threads: usize) -> Self {
        self.config.comparison.threads = threads;
        self
    }

    pub fn enable_exclusively<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.checkers.enabled = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn disable_checker(mut self, name: impl Into<String>) -> Self {
        self.config.checkers.disabled.push(name.into());
        self
    }

    pub const fn policies(mut self, policies: ExceptionPolicies) -> Self {
        self.config.policies = policies;
        self
    }

    pub fn report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output.report_dir = dir.into();
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub const fn summary(mut self, enabled: bool) -> Self {
        self.config.output.summary = enabled;
        self
    }

    pub const fn include_unchanged(mut self, enabled: bool) -> Self {
        self.config.output.include_unchanged = enabled;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}
