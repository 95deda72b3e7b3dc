//! Diff result values.
//!
//! Built once per comparison and never mutated afterwards. All values are
//! plain display text; escaping belongs to the report renderer.

use super::list::ListDiff;
use crate::model::EntityKind;
use serde::Serialize;

/// A scalar property whose values differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDiff {
    pub property: String,
    pub value1: String,
    pub value2: String,
}

/// Aligned rows of an annotation or structure list, tagged with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedListDiff {
    pub name: String,
    #[serde(flatten)]
    pub diff: ListDiff,
}

/// Annotation diff for one value parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterAnnotationDiff {
    pub name: String,
    pub index: usize,
    #[serde(flatten)]
    pub diff: ListDiff,
}

/// Differences found in one matched method or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDiff {
    pub kind: EntityKind,
    pub id: String,
    pub info1: String,
    pub info2: String,
    pub property_diffs: Vec<PropertyDiff>,
    pub annotation_diffs: Vec<NamedListDiff>,
    pub parameter_annotation_diffs: Vec<ParameterAnnotationDiff>,
}

impl MemberDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property_diffs.is_empty()
            && self.annotation_diffs.is_empty()
            && self.parameter_annotation_diffs.is_empty()
    }
}

/// Differences found in one matched class. Only produced when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerDiff {
    pub name: String,
    pub info1: String,
    pub info2: String,
    pub property_diffs: Vec<PropertyDiff>,
    pub annotation_diffs: Vec<NamedListDiff>,
    /// Inner-class, method and field list diffs, in that order.
    pub structure_diffs: Vec<NamedListDiff>,
    /// Sorted by kind (methods first), then id.
    pub member_diffs: Vec<MemberDiff>,
}

impl ContainerDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property_diffs.is_empty()
            && self.annotation_diffs.is_empty()
            && self.structure_diffs.is_empty()
            && self.member_diffs.iter().all(MemberDiff::is_empty)
    }

    /// Matched members with differences of the given kind.
    pub fn members_of(&self, kind: EntityKind) -> impl Iterator<Item = &MemberDiff> {
        self.member_diffs.iter().filter(move |m| m.kind == kind)
    }

    /// The structure list with the given checker name, if it differs.
    #[must_use]
    pub fn structure(&self, name: &str) -> Option<&ListDiff> {
        self.structure_diffs
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.diff)
    }
}
