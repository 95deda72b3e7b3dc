//! Normalized annotation entries.

use super::node::{AnnotationNode, AnnotationValue};
use serde::{Deserialize, Serialize};

/// An annotation with its element values sorted by name.
///
/// Two entries are the same *kind* when their descriptors match, and equal
/// when their full renderings match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub desc: String,
    pub values: Vec<(String, AnnotationValue)>,
}

impl AnnotationEntry {
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.push((name.into(), value));
        self.values.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    /// `@desc` or `@desc(...)` when the annotation carries values.
    #[must_use]
    pub fn short_string(&self) -> String {
        if self.values.is_empty() {
            format!("@{}", self.desc)
        } else {
            format!("@{}(...)", self.desc)
        }
    }

    /// Rendering that includes every element value, used for equality.
    #[must_use]
    pub fn full_string(&self) -> String {
        if self.values.is_empty() {
            return format!("@{}", self.desc);
        }
        let args = self
            .values
            .iter()
            .map(|(name, value)| format!("{name}: {}", value_string(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("@{}( {args} )", self.desc)
    }
}

impl From<&AnnotationNode> for AnnotationEntry {
    fn from(node: &AnnotationNode) -> Self {
        let mut values: Vec<(String, AnnotationValue)> = node
            .values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            desc: node.desc.clone(),
            values,
        }
    }
}

/// Convert parser annotations into entries sorted by descriptor.
#[must_use]
pub fn to_entries(nodes: &[AnnotationNode]) -> Vec<AnnotationEntry> {
    let mut entries: Vec<AnnotationEntry> = nodes.iter().map(AnnotationEntry::from).collect();
    entries.sort_by(|a, b| a.desc.cmp(&b.desc));
    entries
}

/// Render an element value the way it appears inside [`AnnotationEntry::full_string`].
#[must_use]
pub fn value_string(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Null => "NULL".to_string(),
        AnnotationValue::Bool(b) => b.to_string(),
        AnnotationValue::Int(i) => i.to_string(),
        AnnotationValue::Float(f) => f.to_string(),
        AnnotationValue::Str(s) => s.clone(),
        AnnotationValue::Type(desc) => format!("<{desc}>"),
        AnnotationValue::Enum { desc, value } => format!("{desc}.{value}"),
        AnnotationValue::Annotation(node) => AnnotationEntry::from(node).full_string(),
        AnnotationValue::Array(items) => {
            let mut out = String::from("#{ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&value_string(item));
            }
            out.push_str(" }");
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_and_full_string() {
        let plain = AnnotationEntry::new("La/Anno2;");
        assert_eq!(plain.short_string(), "@La/Anno2;");
        assert_eq!(plain.full_string(), "@La/Anno2;");

        let valued = AnnotationEntry::new("La/Anno1;").with_value("x", AnnotationValue::Int(1));
        assert_eq!(valued.short_string(), "@La/Anno1;(...)");
        assert_eq!(valued.full_string(), "@La/Anno1;( x: 1 )");
    }

    #[test]
    fn test_values_sorted_by_name() {
        let node = AnnotationNode::new("La/A;")
            .with_value("b", AnnotationValue::Bool(true))
            .with_value("a", AnnotationValue::Str("s".to_string()));
        let entry = AnnotationEntry::from(&node);
        assert_eq!(entry.full_string(), "@La/A;( a: s, b: true )");
    }

    #[test]
    fn test_nested_values() {
        let nested = AnnotationNode::new("La/Inner;").with_value("v", AnnotationValue::Int(2));
        let value = AnnotationValue::Array(vec![
            AnnotationValue::Type("Ljava/lang/String;".to_string()),
            AnnotationValue::Annotation(nested),
            AnnotationValue::Null,
        ]);
        assert_eq!(
            value_string(&value),
            "#{ <Ljava/lang/String;>, @La/Inner;( v: 2 ), NULL }"
        );
    }

    #[test]
    fn test_to_entries_sorted_by_desc() {
        let entries = to_entries(&[AnnotationNode::new("Lz/Z;"), AnnotationNode::new("La/A;")]);
        let descs: Vec<_> = entries.iter().map(|e| e.desc.as_str()).collect();
        assert_eq!(descs, vec!["La/A;", "Lz/Z;"]);
    }
}
