//! Property registry: the comparable facts extracted from each kind of entity.
//!
//! A [`PropertyRegistry`] is built once at startup through a
//! [`PropertyRegistryBuilder`] and is immutable afterwards. Registration order
//! is the index order, which in turn is the row order of property tables in
//! reports. Each registry is shared by every comparison of its kind.

use super::annotation::AnnotationEntry;
use crate::error::{AbiCmpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// The kinds of entity that carry their own property registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Method,
    Field,
}

impl EntityKind {
    /// Prefix used in checker and defect-type names.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::Field => "field",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Value extracted for a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Int(i64),
    Str(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Optional string, `None` maps to [`PropertyValue::Null`].
    pub fn opt_str(value: Option<&str>) -> Self {
        value.map_or(Self::Null, |s| Self::Str(s.to_string()))
    }

    /// List of strings, sorted so that declaration order does not matter.
    pub fn sorted_strs(values: &[String]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort();
        Self::List(sorted.into_iter().map(Self::Str).collect())
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

type Extractor<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;
type Renderer = Arc<dyn Fn(&PropertyValue) -> String + Send + Sync>;

/// Index of a registered property inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyHandle {
    kind: EntityKind,
    index: usize,
}

impl PropertyHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Value of this property on an entity of the same kind.
    #[must_use]
    pub fn get(self, entity: &Entity) -> &PropertyValue {
        debug_assert_eq!(self.kind, entity.kind);
        &entity.values[self.index]
    }
}

/// A named scalar fact about a source node.
pub struct Property<S> {
    name: String,
    index: usize,
    extract: Extractor<S, PropertyValue>,
    render: Renderer,
}

impl<S> Property<S> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Display string for a value, unescaped.
    #[must_use]
    pub fn render(&self, value: &PropertyValue) -> String {
        (self.render)(value)
    }
}

/// A named list of annotations attached to a source node.
pub struct AnnotationProperty<S> {
    name: String,
    index: usize,
    extract: Extractor<S, Vec<AnnotationEntry>>,
}

impl<S> AnnotationProperty<S> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// A named per-parameter list of annotation lists (methods only).
pub struct ParameterAnnotationProperty<S> {
    name: String,
    index: usize,
    extract: Extractor<S, Vec<Vec<AnnotationEntry>>>,
}

impl<S> ParameterAnnotationProperty<S> {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

/// Default rendering: the value's `Display` text.
#[must_use]
pub fn default_render(value: &PropertyValue) -> String {
    value.to_string()
}

/// Builder collecting property registrations for one entity kind.
pub struct PropertyRegistryBuilder<S> {
    kind: EntityKind,
    properties: Vec<Property<S>>,
    annotations: Vec<AnnotationProperty<S>>,
    parameter_annotations: Vec<ParameterAnnotationProperty<S>>,
}

impl<S> PropertyRegistryBuilder<S> {
    #[must_use]
    pub const fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            annotations: Vec::new(),
            parameter_annotations: Vec::new(),
        }
    }

    /// Register a property rendered with [`default_render`].
    #[must_use]
    pub fn property<F>(self, name: &str, extract: F) -> Self
    where
        F: Fn(&S) -> PropertyValue + Send + Sync + 'static,
    {
        self.property_with_render(name, extract, default_render)
    }

    /// Register a property with its own rendering, e.g. flag bits as keywords.
    #[must_use]
    pub fn property_with_render<F, R>(mut self, name: &str, extract: F, render: R) -> Self
    where
        F: Fn(&S) -> PropertyValue + Send + Sync + 'static,
        R: Fn(&PropertyValue) -> String + Send + Sync + 'static,
    {
        let index = self.properties.len();
        self.properties.push(Property {
            name: name.to_string(),
            index,
            extract: Arc::new(extract),
            render: Arc::new(render),
        });
        self
    }

    #[must_use]
    pub fn annotations<F>(mut self, name: &str, extract: F) -> Self
    where
        F: Fn(&S) -> Vec<AnnotationEntry> + Send + Sync + 'static,
    {
        let index = self.annotations.len();
        self.annotations.push(AnnotationProperty {
            name: name.to_string(),
            index,
            extract: Arc::new(extract),
        });
        self
    }

    #[must_use]
    pub fn parameter_annotations<F>(mut self, name: &str, extract: F) -> Self
    where
        F: Fn(&S) -> Vec<Vec<AnnotationEntry>> + Send + Sync + 'static,
    {
        let index = self.parameter_annotations.len();
        self.parameter_annotations.push(ParameterAnnotationProperty {
            name: name.to_string(),
            index,
            extract: Arc::new(extract),
        });
        self
    }

    /// Freeze the registrations.
    ///
    /// Fails with a configuration error if a name was registered twice for
    /// this kind, across all three property families.
    pub fn build(self) -> Result<PropertyRegistry<S>> {
        let mut seen = HashSet::new();
        let names = self
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.annotations.iter().map(|p| p.name.as_str()))
            .chain(self.parameter_annotations.iter().map(|p| p.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(AbiCmpError::config(format!(
                    "duplicate {} property '{name}'",
                    self.kind
                )));
            }
        }
        Ok(PropertyRegistry {
            kind: self.kind,
            properties: self.properties,
            annotations: self.annotations,
            parameter_annotations: self.parameter_annotations,
        })
    }
}

/// Immutable, ordered list of property descriptors for one entity kind.
pub struct PropertyRegistry<S> {
    kind: EntityKind,
    properties: Vec<Property<S>>,
    annotations: Vec<AnnotationProperty<S>>,
    parameter_annotations: Vec<ParameterAnnotationProperty<S>>,
}

impl<S> PropertyRegistry<S> {
    #[must_use]
    pub const fn builder(kind: EntityKind) -> PropertyRegistryBuilder<S> {
        PropertyRegistryBuilder::new(kind)
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub fn properties(&self) -> &[Property<S>] {
        &self.properties
    }

    #[must_use]
    pub fn annotation_properties(&self) -> &[AnnotationProperty<S>] {
        &self.annotations
    }

    #[must_use]
    pub fn parameter_annotation_properties(&self) -> &[ParameterAnnotationProperty<S>] {
        &self.parameter_annotations
    }

    /// Look up a scalar property by name.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<PropertyHandle> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| PropertyHandle {
                kind: self.kind,
                index: p.index,
            })
    }

    /// Evaluate every registered property against `source`.
    pub fn extract(&self, id: impl Into<String>, source: &S) -> Entity {
        Entity {
            id: id.into(),
            kind: self.kind,
            values: self.properties.iter().map(|p| (p.extract)(source)).collect(),
            annotations: self.annotations.iter().map(|p| (p.extract)(source)).collect(),
            parameter_annotations: self
                .parameter_annotations
                .iter()
                .map(|p| (p.extract)(source))
                .collect(),
        }
    }
}

/// Extracted facts about one compared unit, indexed by registry position.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    values: Vec<PropertyValue>,
    annotations: Vec<Vec<AnnotationEntry>>,
    parameter_annotations: Vec<Vec<Vec<AnnotationEntry>>>,
}

impl Entity {
    #[must_use]
    pub fn value(&self, index: usize) -> &PropertyValue {
        &self.values[index]
    }

    #[must_use]
    pub fn annotations(&self, index: usize) -> &[AnnotationEntry] {
        &self.annotations[index]
    }

    #[must_use]
    pub fn parameter_annotations(&self, index: usize) -> &[Vec<AnnotationEntry>] {
        &self.parameter_annotations[index]
    }
}
