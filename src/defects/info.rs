//! Defect types and their attribute-bearing instances.

use crate::error::{AbiCmpError, Result};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Supporting attribute of a defect. Declaration order is the canonical
/// attribute order used for equality, hashing and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    Class,
    Method,
    Field,
    InnerClass,
    VpIndex,
    Value1,
    Value2,
}

impl AttributeKind {
    /// Placeholder name used in message templates, e.g. `[VALUE1]`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Class => "CLASS",
            Self::Method => "METHOD",
            Self::Field => "FIELD",
            Self::InnerClass => "INNER_CLASS",
            Self::VpIndex => "VP_INDEX",
            Self::Value1 => "VALUE1",
            Self::Value2 => "VALUE2",
        }
    }

    /// Label used in report attribute tables.
    #[must_use]
    pub const fn html_id(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Method => "method",
            Self::Field => "field",
            Self::InnerClass => "inner class",
            Self::VpIndex => "value parameter #",
            Self::Value1 => "value #1",
            Self::Value2 => "value #2",
        }
    }
}

#[derive(Debug)]
struct DefectTypeInner {
    id: String,
    message_format: String,
    required: Vec<AttributeKind>,
}

/// A class of defect: identifier, message template and required attributes.
///
/// Cheap to clone. Identity, ordering and hashing use the id only.
#[derive(Debug, Clone)]
pub struct DefectType(Arc<DefectTypeInner>);

impl DefectType {
    pub fn new(
        id: impl Into<String>,
        message_format: impl Into<String>,
        required: &[AttributeKind],
    ) -> Self {
        let mut required = required.to_vec();
        required.sort();
        required.dedup();
        Self(Arc::new(DefectTypeInner {
            id: id.into(),
            message_format: message_format.into(),
            required,
        }))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    #[must_use]
    pub fn message_format(&self) -> &str {
        &self.0.message_format
    }

    #[must_use]
    pub fn required_attributes(&self) -> &[AttributeKind] {
        &self.0.required
    }

    /// Shortcut for [`DefectInfo::new`].
    pub fn info<I>(&self, attributes: I) -> Result<DefectInfo>
    where
        I: IntoIterator<Item = (AttributeKind, String)>,
    {
        DefectInfo::new(self.clone(), attributes.into_iter().collect())
    }
}

impl PartialEq for DefectType {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for DefectType {}

impl PartialOrd for DefectType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DefectType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.id.cmp(&other.0.id)
    }
}

impl Hash for DefectType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl Serialize for DefectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.id)
    }
}

impl fmt::Display for DefectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.id)
    }
}

/// A concrete finding: a defect type plus the values of its attributes.
///
/// Equal iff same type and same attribute values; ordered by type id, then
/// attributes in canonical key order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DefectInfo {
    #[serde(rename = "type")]
    defect_type: DefectType,
    attributes: BTreeMap<AttributeKind, String>,
}

impl DefectInfo {
    /// Fails with a configuration error if a required attribute is absent.
    pub fn new(
        defect_type: DefectType,
        attributes: BTreeMap<AttributeKind, String>,
    ) -> Result<Self> {
        if let Some(missing) = defect_type
            .required_attributes()
            .iter()
            .find(|attr| !attributes.contains_key(attr))
        {
            return Err(AbiCmpError::config(format!(
                "missing required attribute {} for defect type {}",
                missing.id(),
                defect_type.id()
            )));
        }
        Ok(Self {
            defect_type,
            attributes,
        })
    }

    #[must_use]
    pub const fn defect_type(&self) -> &DefectType {
        &self.defect_type
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<AttributeKind, String> {
        &self.attributes
    }

    #[must_use]
    pub fn get(&self, attr: AttributeKind) -> Option<&str> {
        self.attributes.get(&attr).map(String::as_str)
    }

    /// `[<type id>] <template with [ATTR] placeholders substituted>`.
    #[must_use]
    pub fn message(&self) -> String {
        // Single pass over the template: substituted values are never rescanned.
        let mut message = format!("[{}] ", self.defect_type.id());
        let mut rest = self.defect_type.message_format();
        while let Some(open) = rest.find('[') {
            message.push_str(&rest[..open]);
            let tail = &rest[open..];
            let value = tail.find(']').and_then(|close| {
                let name = &tail[1..close];
                self.attributes
                    .iter()
                    .find(|(attr, _)| attr.id() == name)
                    .map(|(_, value)| (value, close))
            });
            match value {
                Some((value, close)) => {
                    message.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    message.push('[');
                    rest = &tail[1..];
                }
            }
        }
        message.push_str(rest);
        message
    }
}
