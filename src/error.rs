//! Unified error types for abicmp.
//!
//! Errors fall into a small taxonomy: configuration errors are fatal and are
//! raised before any comparison starts, per-entity and per-archive errors are
//! isolated by the engine and turned into report entries, and output errors
//! are propagated to the caller of a whole batch.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for abicmp operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AbiCmpError {
    /// Invalid setup: duplicate property, unknown checker, bad defect attributes
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Errors turning entry bytes into a class node
    #[error("Failed to parse class: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while comparing one entity
    #[error("Comparison failed: {context}")]
    Compare {
        context: String,
        #[source]
        source: CompareErrorKind,
    },

    /// Errors opening or reading an archive
    #[error("Archive error: {context}")]
    Archive {
        context: String,
        #[source]
        source: ArchiveErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Empty entry")]
    Empty,

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Specific comparison error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompareErrorKind {
    #[error("Malformed node '{node}': {message}")]
    MalformedNode { node: String, message: String },
}

/// Specific archive error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArchiveErrorKind {
    #[error("Archive not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory archive: {0}")]
    NotADirectory(PathBuf),

    #[error("No such entry: {0}")]
    MissingEntry(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Formatting failed: {0}")]
    FormatError(#[from] std::fmt::Error),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for abicmp operations
pub type Result<T> = std::result::Result<T, AbiCmpError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl AbiCmpError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a comparison error for a node that does not have the expected shape
    pub fn malformed(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Compare {
            context: "checking entity".to_string(),
            source: CompareErrorKind::MalformedNode {
                node: node.into(),
                message: message.into(),
            },
        }
    }

    /// Create an archive error with context
    pub fn archive(context: impl Into<String>, source: ArchiveErrorKind) -> Self {
        Self::Archive {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Whether this error belongs to the configuration class.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Short, single-line cause used when an error is folded into a report.
    #[must_use]
    pub fn cause(&self) -> String {
        match self {
            Self::Compare { source, .. } => source.to_string(),
            Self::Parse { source, .. } => source.to_string(),
            Self::Archive { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for AbiCmpError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AbiCmpError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<std::fmt::Error> for AbiCmpError {
    fn from(err: std::fmt::Error) -> Self {
        Self::report("writing report", ReportErrorKind::FormatError(err))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain: the newest context is prepended to the existing one,
/// so an error that crossed several layers reads `outer: middle: inner`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<AbiCmpError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: AbiCmpError, new_ctx: &str) -> AbiCmpError {
    match err {
        AbiCmpError::Config(msg) => AbiCmpError::Config(chain_context(new_ctx, &msg)),
        AbiCmpError::Parse {
            context: existing,
            source,
        } => AbiCmpError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AbiCmpError::Compare {
            context: existing,
            source,
        } => AbiCmpError::Compare {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AbiCmpError::Archive {
            context: existing,
            source,
        } => AbiCmpError::Archive {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AbiCmpError::Report {
            context: existing,
            source,
        } => AbiCmpError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        AbiCmpError::Io {
            path,
            message,
            source,
        } => AbiCmpError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to a malformed-node error for `node`.
    fn malformed_none(self, node: &str, message: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn malformed_none(self, node: &str, message: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| AbiCmpError::malformed(node, message))
    }
}
