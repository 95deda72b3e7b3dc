//! Config command handler.

use crate::config::{generate_full_example_config, generate_json_schema, AppConfig};
use anyhow::Result;

/// What `abicmp config` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutput {
    /// JSON schema of the config file
    Schema,
    /// Commented example config file
    Example,
    /// The effective configuration after file discovery
    Effective,
}

/// Render the requested configuration document.
pub fn run_config(config: &AppConfig, output: ConfigOutput) -> Result<String> {
    Ok(match output {
        ConfigOutput::Schema => generate_json_schema(),
        ConfigOutput::Example => generate_full_example_config(),
        ConfigOutput::Effective => serde_yaml_ng::to_string(config)?,
    })
}
