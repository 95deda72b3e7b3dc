//! Parser trait for the structural class reader.

use crate::error::Result;
use crate::model::ClassNode;
use std::path::Path;

/// Turns the raw bytes of an archive entry into a [`ClassNode`] tree.
///
/// Implementations only decode declared structure; method bodies are never
/// read. The produced tree is treated as read-only by the engine.
pub trait ClassParser: Send + Sync {
    /// Parse one entry's content. `entry` names the entry for error context.
    fn parse_bytes(&self, entry: &str, content: &[u8]) -> Result<ClassNode>;

    /// Parse a file on disk
    fn parse_file(&self, path: &Path) -> Result<ClassNode> {
        let content = std::fs::read(path).map_err(|e| crate::error::AbiCmpError::io(path, e))?;
        self.parse_bytes(&path.display().to_string(), &content)
    }

    /// Suffix of archive entries this parser handles, e.g. `.class.json`
    fn entry_suffix(&self) -> &str;

    /// Get format name
    fn format_name(&self) -> &str;

    /// Whether an archive entry should be handed to this parser
    fn accepts(&self, entry: &str) -> bool {
        entry.ends_with(self.entry_suffix())
    }
}
