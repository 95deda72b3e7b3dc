//! Exception policies.
//!
//! Each policy is an independent toggle with a documented default. Checkers
//! consult them before emitting a finding; the reconciliation algorithms
//! themselves know nothing about policies.

use crate::model::{flags, AnnotationEntry, ClassNode, InnerClassNode, MethodNode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Nullability annotation descriptors.
pub const NULLABILITY_ANNOTATIONS: &[&str] = &[
    "Lorg/jetbrains/annotations/NotNull;",
    "Lorg/jetbrains/annotations/Nullable;",
];

/// Toggles for the heuristics that suppress findings nobody cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExceptionPolicies {
    /// Drop members that are synthetic on every side they appear on
    pub ignore_synthetic_members: bool,
    /// Treat bridge methods like synthetic members
    pub ignore_bridge_methods: bool,
    /// Skip classes that are synthetic on every side they appear on
    pub ignore_synthetic_classes: bool,
    /// Skip anonymous and local classes
    pub ignore_anonymous_local_classes: bool,
    /// Drop one-sided nullability annotations on equally invisible members
    pub ignore_nullability_on_invisible: bool,
    /// Do not report a private method that moved into a `name$suffix` method
    pub ignore_closure_converted: bool,
    /// Leave `WhenMappings` out of inner-class lists
    pub ignore_when_mappings: bool,
    /// Leave SAM adapter classes out of inner-class lists
    pub ignore_sam_adapters: bool,
    /// Only list and compare public or protected fields
    pub public_fields_only: bool,
}

impl Default for ExceptionPolicies {
    fn default() -> Self {
        Self {
            ignore_synthetic_members: true,
            ignore_bridge_methods: false,
            ignore_synthetic_classes: true,
            ignore_anonymous_local_classes: true,
            ignore_nullability_on_invisible: true,
            ignore_closure_converted: false,
            ignore_when_mappings: true,
            ignore_sam_adapters: true,
            public_fields_only: false,
        }
    }
}

impl ExceptionPolicies {
    /// Every policy off: report everything the checkers see.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            ignore_synthetic_members: false,
            ignore_bridge_methods: false,
            ignore_synthetic_classes: false,
            ignore_anonymous_local_classes: false,
            ignore_nullability_on_invisible: false,
            ignore_closure_converted: false,
            ignore_when_mappings: false,
            ignore_sam_adapters: false,
            public_fields_only: false,
        }
    }

    /// Whether a member with these flags is hidden from lists and comparison.
    #[must_use]
    pub const fn is_ignored_member(&self, access: u32) -> bool {
        (self.ignore_synthetic_members && flags::is_synthetic(access))
            || (self.ignore_bridge_methods && flags::is_bridge(access))
    }

    /// Whether a field with these flags is hidden from lists and comparison.
    #[must_use]
    pub const fn is_ignored_field(&self, access: u32) -> bool {
        self.is_ignored_member(access)
            || (self.public_fields_only && !flags::is_api_visible(access))
    }

    /// Whether a class appearing on one side should not be compared or listed.
    #[must_use]
    pub fn is_ignored_class(&self, node: &ClassNode) -> bool {
        (self.ignore_synthetic_classes && node.is_synthetic())
            || (self.ignore_anonymous_local_classes && node.is_anonymous_local())
    }

    /// Whether an inner-class table entry is left out of the inner-class list.
    ///
    /// Entries without an inner name (anonymous classes) are always left out.
    #[must_use]
    pub fn is_ignored_inner_class(&self, inner: &InnerClassNode) -> bool {
        match inner.inner_name.as_deref() {
            None => true,
            Some(inner_name) => {
                (self.ignore_when_mappings && inner_name == "WhenMappings")
                    || (self.ignore_sam_adapters && is_sam_adapter_name(&inner.name))
            }
        }
    }

    /// Strip nullability annotations present on only one side, for members
    /// that are equally invisible on both sides.
    #[must_use]
    pub fn filter_nullability(
        &self,
        access1: u32,
        access2: u32,
        anns1: &[AnnotationEntry],
        anns2: &[AnnotationEntry],
    ) -> (Vec<AnnotationEntry>, Vec<AnnotationEntry>) {
        if !self.ignore_nullability_on_invisible || !equally_invisible(access1, access2) {
            return (anns1.to_vec(), anns2.to_vec());
        }
        let has1 = anns1.iter().any(is_nullability);
        let has2 = anns2.iter().any(is_nullability);
        let strip = |anns: &[AnnotationEntry]| -> Vec<AnnotationEntry> {
            anns.iter().filter(|a| !is_nullability(a)).cloned().collect()
        };
        match (has1, has2) {
            (true, false) => (strip(anns1), anns2.to_vec()),
            (false, true) => (anns1.to_vec(), strip(anns2)),
            _ => (anns1.to_vec(), anns2.to_vec()),
        }
    }

    /// Whether a private method absent from `other_side` was turned into a
    /// `name$suffix` method there.
    #[must_use]
    pub fn is_closure_converted(&self, method: &MethodNode, other_side: &[MethodNode]) -> bool {
        if !self.ignore_closure_converted
            || !flags::is_private(method.access)
            || flags::is_synthetic(method.access)
        {
            return false;
        }
        let prefix = format!("{}$", method.name);
        other_side.iter().any(|m| {
            flags::is_private(m.access) && m.name.len() > prefix.len() && m.name.starts_with(&prefix)
        })
    }
}

/// Both private, both synthetic, or both bridge.
#[must_use]
pub const fn equally_invisible(access1: u32, access2: u32) -> bool {
    (flags::is_private(access1) && flags::is_private(access2))
        || (flags::is_synthetic(access1) && flags::is_synthetic(access2))
        || (flags::is_bridge(access1) && flags::is_bridge(access2))
}

/// SAM adapter classes are named `...$sam$...$0`.
#[must_use]
pub fn is_sam_adapter_name(name: &str) -> bool {
    name.contains("$sam$") && name.ends_with("$0")
}

fn is_nullability(entry: &AnnotationEntry) -> bool {
    NULLABILITY_ANNOTATIONS.contains(&entry.desc.as_str())
}
