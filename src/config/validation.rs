//! Configuration validation for abicmp.
//!
//! Checker names are validated against the registered checker set.

use super::types::{AppConfig, CheckersConfig, ComparisonConfig, OutputConfig};
use crate::diff::{CheckerSet, ExceptionPolicies};
use crate::model::Schema;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.comparison.validate());
        errors.extend(self.checkers.validate());
        errors.extend(self.policies.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.header1.trim().is_empty() {
            errors.push(ConfigError::new("comparison.header1", "Header must not be empty"));
        }
        if self.header2.trim().is_empty() {
            errors.push(ConfigError::new("comparison.header2", "Header must not be empty"));
        }
        match (&self.id1, &self.id2) {
            (Some(id1), Some(_)) if id1.is_empty() => {
                errors.push(ConfigError::new("comparison.id1", "Id must not be empty"));
            }
            (Some(_), None) | (None, Some(_)) => {
                errors.push(ConfigError::new(
                    "comparison.id1",
                    "id1 and id2 must be given together",
                ));
            }
            _ => {}
        }
        if self.threads > 1024 {
            errors.push(ConfigError::new(
                "comparison.threads",
                format!("Thread count must be at most 1024, got {}", self.threads),
            ));
        }
        for desc in &self.ignored_annotations {
            if !(desc.starts_with('L') && desc.ends_with(';')) {
                errors.push(ConfigError::new(
                    "comparison.ignored_annotations",
                    format!("'{desc}' is not a type descriptor like 'Lpkg/Name;'"),
                ));
            }
        }
        errors
    }
}

impl Validatable for CheckersConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let known = match Schema::standard() {
            Ok(schema) => CheckerSet::known_names(&schema),
            Err(e) => return vec![ConfigError::new("checkers", e.to_string())],
        };
        let mut errors = Vec::new();
        for (field, names) in [
            ("checkers.enabled", self.enabled.iter().flatten().collect::<Vec<_>>()),
            ("checkers.disabled", self.disabled.iter().collect()),
        ] {
            for name in names {
                if !known.contains(name) {
                    errors.push(ConfigError::new(field, format!("Unknown checker '{name}'")));
                }
            }
        }
        if self.enabled.as_ref().is_some_and(Vec::is_empty) {
            errors.push(ConfigError::new(
                "checkers.enabled",
                "Enabling an empty checker list disables every check",
            ));
        }
        errors
    }
}

impl Validatable for ExceptionPolicies {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.report_dir.as_os_str().is_empty() {
            errors.push(ConfigError::new("output.report_dir", "Report directory must not be empty"));
        }
        if self.report_dir.is_file() {
            errors.push(ConfigError::new(
                "output.report_dir",
                format!("{} is a file", self.report_dir.display()),
            ));
        }
        errors
    }
}
