//! Default configurations and presets for abicmp.

use super::types::{AppConfig, OutputConfig};
use crate::diff::ExceptionPolicies;
use crate::reports::ReportFormat;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Default suppression policies, HTML reports
    Default,
    /// Every suppression policy off: report everything the checkers see
    Strict,
    /// Every suppression policy on: public API changes only
    Lenient,
    /// JSON reports for machine consumption
    CiCd,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Lenient => "lenient",
            Self::CiCd => "ci-cd",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" | "all" => Some(Self::Strict),
            "lenient" | "api" => Some(Self::Lenient),
            "ci-cd" | "ci" | "pipeline" => Some(Self::CiCd),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Documented default policies, HTML reports with a summary",
            Self::Strict => "No suppression heuristics; synthetic and anonymous classes included",
            Self::Lenient => "Bridge methods, closure-converted methods and non-public fields ignored",
            Self::CiCd => "Default policies with JSON reports",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Lenient, Self::CiCd]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self::strict_preset(),
            ConfigPreset::Lenient => Self::lenient_preset(),
            ConfigPreset::CiCd => Self::ci_cd_preset(),
        }
    }

    #[must_use]
    pub fn strict_preset() -> Self {
        Self {
            policies: ExceptionPolicies::none(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn lenient_preset() -> Self {
        Self {
            policies: ExceptionPolicies {
                ignore_bridge_methods: true,
                ignore_closure_converted: true,
                public_fields_only: true,
                ..ExceptionPolicies::default()
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn ci_cd_preset() -> Self {
        Self {
            output: OutputConfig {
                format: ReportFormat::Json,
                ..OutputConfig::default()
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default column title of the first side.
pub const DEFAULT_HEADER1: &str = "#1";

/// Default column title of the second side.
pub const DEFAULT_HEADER2: &str = "#2";
