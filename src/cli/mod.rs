//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs. Each handler implements the
//! logic of one subcommand and returns the process exit code.

mod batch;
mod compare;
mod config;

pub use batch::run_compare_archives;
pub use compare::run_compare;
pub use config::{run_config, ConfigOutput};
