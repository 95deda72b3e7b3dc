//! Configuration module for abicmp.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```
//! use abicmp::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::builder()
//!     .headers("1.3.0", "1.4.0")
//!     .id_mapping("-1.3.0", "-1.4.0")
//!     .disable_checker("class.sourceFile")
//!     .build();
//! assert!(config.is_valid());
//!
//! let strict = AppConfig::from_preset(ConfigPreset::Strict);
//! assert!(!strict.policies.ignore_synthetic_members);
//! ```
//!
//! # Configuration File
//!
//! Place a `.abicmp.yaml` file in the working directory or `~/.config/abicmp/`:
//!
//! ```yaml
//! comparison:
//!   header1: '1.3.0'
//!   header2: '1.4.0'
//! policies:
//!   ignore_bridge_methods: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{ConfigPreset, DEFAULT_HEADER1, DEFAULT_HEADER2};
pub use types::{AppConfig, AppConfigBuilder, CheckersConfig, ComparisonConfig, OutputConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

use crate::diff::ClassComparer;
use crate::error::{AbiCmpError, Result};
use crate::parsers::JsonClassParser;
use crate::pipeline::{ArchiveComparer, BatchRunner};
use std::sync::Arc;

impl AppConfig {
    /// Validate and turn every error into one configuration error.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AbiCmpError::config(joined))
    }

    /// Build the class comparer described by the checker and policy sections.
    pub fn class_comparer(&self) -> Result<ClassComparer> {
        ClassComparer::builder()
            .checkers(self.checkers.to_configuration())
            .policies(self.policies.clone())
            .ignored_annotations(self.comparison.ignored_annotations.clone())
            .build()
    }

    /// Archive-pair comparer using the JSON class parser.
    pub fn archive_comparer(&self) -> Result<ArchiveComparer> {
        Ok(
            ArchiveComparer::new(Arc::new(self.class_comparer()?), Arc::new(JsonClassParser::new()))
                .with_headers(&self.comparison.header1, &self.comparison.header2),
        )
    }

    /// Batch runner configured from every section.
    pub fn batch_runner(&self) -> Result<BatchRunner> {
        self.ensure_valid()?;
        let mut runner = BatchRunner::new(self.archive_comparer()?, &self.output.report_dir)
            .format(self.output.format)
            .threads(self.comparison.threads)
            .write_summary(self.output.summary)
            .include_unchanged(self.output.include_unchanged);
        if let (Some(id1), Some(id2)) = (&self.comparison.id1, &self.comparison.id2) {
            runner = runner.id_mapping(id1, id2);
        }
        Ok(runner)
    }
}

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.abicmp.yaml` config files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
