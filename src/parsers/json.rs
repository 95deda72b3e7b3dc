//! JSON class-node parser.
//!
//! Reads the serialized form of [`ClassNode`] produced by an external class
//! file dumper: one JSON document per class, field names in camelCase.

use super::traits::ClassParser;
use crate::error::{AbiCmpError, ErrorContext, ParseErrorKind, Result};
use crate::model::ClassNode;

/// Entry suffix of serialized class nodes.
pub const CLASS_JSON_SUFFIX: &str = ".class.json";

/// Parser for `.class.json` entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonClassParser;

impl JsonClassParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ClassParser for JsonClassParser {
    fn parse_bytes(&self, entry: &str, content: &[u8]) -> Result<ClassNode> {
        if content.iter().all(u8::is_ascii_whitespace) {
            return Err(AbiCmpError::parse(entry, ParseErrorKind::Empty));
        }
        let node: ClassNode = serde_json::from_slice(content)
            .map_err(|e| AbiCmpError::parse(entry, ParseErrorKind::InvalidJson(e.to_string())))?;
        if node.name.is_empty() {
            return Err(AbiCmpError::parse(
                entry,
                ParseErrorKind::MissingField("name".to_string()),
            ));
        }
        validate_members(&node).with_context(|| format!("validating {entry}"))?;
        Ok(node)
    }

    fn entry_suffix(&self) -> &str {
        CLASS_JSON_SUFFIX
    }

    fn format_name(&self) -> &str {
        "class-json"
    }
}

fn validate_members(node: &ClassNode) -> Result<()> {
    if let Some(m) = node.methods.iter().find(|m| m.name.is_empty() || m.desc.is_empty()) {
        return Err(AbiCmpError::parse(
            &node.name,
            ParseErrorKind::MissingField(format!("method name/desc ({})", m.id())),
        ));
    }
    if let Some(f) = node.fields.iter().find(|f| f.name.is_empty() || f.desc.is_empty()) {
        return Err(AbiCmpError::parse(
            &node.name,
            ParseErrorKind::MissingField(format!("field name/desc ({})", f.id())),
        ));
    }
    Ok(())
}
