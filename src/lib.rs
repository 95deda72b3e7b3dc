//! **Structural ABI comparison for compiled class archives.**
//!
//! `abicmp` compares two builds of the same libraries class by class and
//! reports every difference in the declared structure: access flags,
//! signatures, super types, annotations, parameter annotations and the
//! member lists themselves. Method bodies are never looked at.
//!
//! Findings are classified as defects. The same defect observed in many
//! classes is clustered into one summary entry with a location list, so a
//! regression that touches thousands of classes reads as one line item.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the source-node tree handed over by a class parser, and
//!   the property registry that projects it into comparable [`model::Entity`]
//!   values.
//! - **[`diff`]**: list reconciliation, annotation diffing, the checker set
//!   and the [`ClassComparer`] that runs it over a class pair.
//! - **[`defects`]**: defect types, locations and the clustering
//!   [`SummaryReport`].
//! - **[`pipeline`]**: archive access, the archive-pair job and the
//!   directory batch runner.
//! - **[`reports`]**: HTML and JSON renderers.
//! - **[`config`]**: YAML configuration, presets and validation.
//!
//! ## Comparing Two Classes
//!
//! ```
//! use abicmp::diff::ClassComparer;
//! use abicmp::model::{flags, ClassNode, MethodNode};
//!
//! let comparer = ClassComparer::new().unwrap();
//!
//! let mut old = ClassNode::new(flags::ACC_PUBLIC, "com/example/Api");
//! old.methods.push(MethodNode::new(flags::ACC_PUBLIC, "bar", "()V"));
//! old.methods.push(MethodNode::new(flags::ACC_PUBLIC, "foo", "()V"));
//! let mut new = ClassNode::new(flags::ACC_PUBLIC, "com/example/Api");
//! new.methods.push(MethodNode::new(flags::ACC_PUBLIC, "baz", "()V"));
//! new.methods.push(MethodNode::new(flags::ACC_PUBLIC, "foo", "()V"));
//!
//! let result = comparer.compare("api.jar", &old, &new).unwrap();
//! let methods = result.diff.unwrap();
//! let methods = methods.structure("class.methods").unwrap();
//! assert_eq!(methods.only_left().collect::<Vec<_>>(), vec!["bar()V public"]);
//! assert_eq!(methods.only_right().collect::<Vec<_>>(), vec!["baz()V public"]);
//! ```
//!
//! ## Comparing Two Directory Trees
//!
//! ```no_run
//! use abicmp::config::AppConfig;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::builder()
//!         .headers("1.3.0", "1.4.0")
//!         .id_mapping("-1.3.0", "-1.4.0")
//!         .report_dir("reports")
//!         .build();
//!     let outcome = config
//!         .batch_runner()?
//!         .run(Path::new("dist-1.3.0"), Path::new("dist-1.4.0"))?;
//!     println!("{} unique defects", outcome.summary.total_unique_defects());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod defects;
pub mod diff;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, ConfigPreset, Validatable};
pub use defects::{DefectInfo, DefectReport, DefectType, Location, SummaryReport};
pub use diff::{CheckerConfiguration, ClassComparer, ContainerDiff, ExceptionPolicies};
pub use error::{AbiCmpError, ErrorContext, OptionContext, Result};
pub use model::{ClassNode, FieldNode, MethodNode, Schema};
pub use parsers::{ClassParser, JsonClassParser};
pub use pipeline::{Archive, ArchiveComparer, ArchiveReport, BatchRunner, DirArchive};
pub use reports::{ReportFormat, ReportGenerator};
