//! Source-node tree handed over by the structural parser.
//!
//! These structs mirror what a class-file reader exposes after skipping code:
//! the class header, its inner-class table, and the method/field tables with
//! their annotations. They are read-only inputs to the comparison; nothing in
//! the engine mutates a node.

use super::flags;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An annotation as it appears on a class, member or parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationNode {
    /// Type descriptor, e.g. `Lorg/jetbrains/annotations/NotNull;`
    pub desc: String,
    /// Element values in declaration order
    #[serde(default)]
    pub values: IndexMap<String, AnnotationValue>,
}

impl AnnotationNode {
    pub fn new(desc: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }
}

/// Value of an annotation element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AnnotationValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A class literal, stored as its descriptor
    Type(String),
    Enum { desc: String, value: String },
    Annotation(AnnotationNode),
    Array(Vec<AnnotationValue>),
}

/// Entry of the `InnerClasses` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerClassNode {
    pub name: String,
    #[serde(default)]
    pub outer_name: Option<String>,
    /// `None` for anonymous classes
    #[serde(default)]
    pub inner_name: Option<String>,
    #[serde(default)]
    pub access: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodNode {
    pub access: u32,
    pub name: String,
    pub desc: String,
    pub signature: Option<String>,
    pub exceptions: Vec<String>,
    pub annotation_default: Option<AnnotationValue>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub visible_parameter_annotations: Vec<Vec<AnnotationNode>>,
    pub invisible_parameter_annotations: Vec<Vec<AnnotationNode>>,
}

impl MethodNode {
    pub fn new(access: u32, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }

    /// Stable id used to match methods across versions: `name + desc`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}{}", self.name, self.desc)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldNode {
    pub access: u32,
    pub name: String,
    pub desc: String,
    pub signature: Option<String>,
    /// Constant initial value, if any
    pub value: Option<AnnotationValue>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
}

impl FieldNode {
    pub fn new(access: u32, name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }

    /// Stable id used to match fields across versions: `name:desc`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}:{}", self.name, self.desc)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassNode {
    pub version: u32,
    pub access: u32,
    /// Internal name, e.g. `com/example/Foo$Bar`
    pub name: String,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
    pub source_file: Option<String>,
    pub outer_class: Option<String>,
    pub outer_method: Option<String>,
    pub outer_method_desc: Option<String>,
    pub visible_annotations: Vec<AnnotationNode>,
    pub invisible_annotations: Vec<AnnotationNode>,
    pub inner_classes: Vec<InnerClassNode>,
    pub methods: Vec<MethodNode>,
    pub fields: Vec<FieldNode>,
}

impl ClassNode {
    pub fn new(access: u32, name: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            super_name: Some("java/lang/Object".to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        flags::is_synthetic(self.access)
    }

    /// An anonymous or local class lists itself in its inner-class table without an inner name.
    #[must_use]
    pub fn is_anonymous_local(&self) -> bool {
        self.inner_classes
            .iter()
            .any(|ic| ic.name == self.name && ic.inner_name.is_none())
    }
}

/// Number of parameters declared by a method descriptor.
///
/// Returns `None` when the descriptor is not of the form `(<params>)<return>`.
#[must_use]
pub fn parameter_count(desc: &str) -> Option<usize> {
    let rest = desc.strip_prefix('(')?;
    let close = rest.find(')')?;
    let params = rest[..close].as_bytes();
    let ret = &rest[close + 1..];
    if ret.is_empty() {
        return None;
    }

    let mut count = 0;
    let mut i = 0;
    while i < params.len() {
        while i < params.len() && params[i] == b'[' {
            i += 1;
        }
        match params.get(i)? {
            b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => i += 1,
            b'L' => {
                let end = params[i..].iter().position(|&b| b == b';')?;
                i += end + 1;
            }
            _ => return None,
        }
        count += 1;
    }
    Some(count)
}
