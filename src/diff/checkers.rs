//! Checkers: the comparison units run for each entity kind.
//!
//! The set of checker kinds is closed. A [`ClassChecker`] is a property,
//! annotation or list checker; a [`MemberChecker`] is a property, annotation
//! or parameter-annotation checker. Each one appends findings to an
//! [`EntityReport`] and nothing else.

use super::annotations::diff_annotations;
use super::list::{reconcile, ListDiff, MISSING};
use super::policy::ExceptionPolicies;
use super::result::{NamedListDiff, ParameterAnnotationDiff, PropertyDiff};
use crate::defects::{AttributeKind, DefectInfo, DefectReport, DefectType, Location};
use crate::error::{AbiCmpError, OptionContext, Result};
use crate::model::{
    flags, parameter_count, AnnotationEntry, ClassNode, Entity, FieldNode, InnerClassNode,
    MethodNode, PropertyRegistry, Schema,
};
use std::collections::{BTreeMap, BTreeSet};

/// Names of the list checkers, in run order.
pub const INNER_CLASSES_CHECKER: &str = "class.innerClasses";
pub const METHODS_CHECKER: &str = "class.methods";
pub const FIELDS_CHECKER: &str = "class.fields";

const LIST_CHECKERS: [&str; 3] = [INNER_CLASSES_CHECKER, METHODS_CHECKER, FIELDS_CHECKER];

/// Findings collected for one entity while its checkers run.
#[derive(Debug)]
pub struct EntityReport {
    location: Location,
    pub(crate) property_diffs: Vec<PropertyDiff>,
    pub(crate) annotation_diffs: Vec<NamedListDiff>,
    pub(crate) parameter_annotation_diffs: Vec<ParameterAnnotationDiff>,
    pub(crate) structure_diffs: Vec<NamedListDiff>,
    pub(crate) defects: DefectReport,
}

impl EntityReport {
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            property_diffs: Vec::new(),
            annotation_diffs: Vec::new(),
            parameter_annotation_diffs: Vec::new(),
            structure_diffs: Vec::new(),
            defects: DefectReport::new(),
        }
    }

    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    pub fn add_property_diff(&mut self, diff: PropertyDiff) {
        self.property_diffs.push(diff);
    }

    pub fn add_defect(&mut self, info: DefectInfo) {
        self.defects.report(info, self.location.clone());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property_diffs.is_empty()
            && self.annotation_diffs.is_empty()
            && self.parameter_annotation_diffs.is_empty()
            && self.structure_diffs.is_empty()
    }
}

fn attrs<const N: usize>(pairs: [(AttributeKind, &str); N]) -> BTreeMap<AttributeKind, String> {
    pairs.into_iter().map(|(k, v)| (k, v.to_string())).collect()
}

// ============================================================================
// Checker configuration
// ============================================================================

/// Which checkers run. Defaults to all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerConfiguration {
    enabled: Option<BTreeSet<String>>,
    disabled: BTreeSet<String>,
}

impl CheckerConfiguration {
    /// Every known checker enabled.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Only the named checkers run.
    #[must_use]
    pub fn enable_exclusively<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: Some(names.into_iter().map(Into::into).collect()),
            disabled: BTreeSet::new(),
        }
    }

    /// Switch off the named checkers on top of the current selection.
    #[must_use]
    pub fn disable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name)
            && self.enabled.as_ref().map_or(true, |enabled| enabled.contains(name))
    }

    /// Reject names that no checker carries.
    pub fn validate(&self, known: &[String]) -> Result<()> {
        let mentioned = self.enabled.iter().flatten().chain(self.disabled.iter());
        for name in mentioned {
            if !known.iter().any(|k| k == name) {
                return Err(AbiCmpError::config(format!("unknown checker '{name}'")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Property checker
// ============================================================================

/// Compares one scalar property.
#[derive(Debug, Clone)]
pub struct PropertyChecker {
    name: String,
    property: String,
    index: usize,
    defect: DefectType,
}

impl PropertyChecker {
    fn new(prefix: &str, property: &str, index: usize) -> Self {
        let name = format!("{prefix}.{property}");
        Self {
            defect: DefectType::new(
                name.clone(),
                "Values mismatch: [VALUE1] != [VALUE2]",
                &[AttributeKind::Value1, AttributeKind::Value2],
            ),
            name,
            property: property.to_string(),
            index,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check<S>(
        &self,
        registry: &PropertyRegistry<S>,
        entity1: &Entity,
        entity2: &Entity,
        report: &mut EntityReport,
    ) -> Result<()> {
        let value1 = entity1.value(self.index);
        let value2 = entity2.value(self.index);
        if value1 == value2 {
            return Ok(());
        }
        let property = &registry.properties()[self.index];
        report.add_property_diff(PropertyDiff {
            property: self.property.clone(),
            value1: property.render(value1),
            value2: property.render(value2),
        });
        let info = DefectInfo::new(
            self.defect.clone(),
            attrs([
                (AttributeKind::Value1, value1.to_string().as_str()),
                (AttributeKind::Value2, value2.to_string().as_str()),
            ]),
        )?;
        report.add_defect(info);
        Ok(())
    }
}

// ============================================================================
// Annotation checkers
// ============================================================================

/// Defect types shared by annotation and parameter-annotation checkers.
#[derive(Debug, Clone)]
struct AnnotationDefects {
    mismatch: DefectType,
    missing1: DefectType,
    missing2: DefectType,
}

impl AnnotationDefects {
    fn for_annotations(name: &str) -> Self {
        use AttributeKind::{Value1, Value2};
        Self {
            mismatch: DefectType::new(
                format!("{name}.mismatch"),
                "Annotations mismatch: [VALUE1] != [VALUE2]",
                &[Value1, Value2],
            ),
            missing1: DefectType::new(
                format!("{name}.missing1"),
                "Missing annotation in #1: [VALUE2]",
                &[Value2],
            ),
            missing2: DefectType::new(
                format!("{name}.missing2"),
                "Missing annotation in #2: [VALUE1]",
                &[Value1],
            ),
        }
    }

    fn for_parameters(name: &str) -> Self {
        use AttributeKind::{Method, Value1, Value2, VpIndex};
        Self {
            mismatch: DefectType::new(
                format!("{name}.mismatch"),
                "Value parameter annotation mismatch: [VALUE1] != [VALUE2]",
                &[Method, VpIndex, Value1, Value2],
            ),
            missing1: DefectType::new(
                format!("{name}.missing1"),
                "Missing value parameter annotation in #1: [VALUE2]",
                &[Method, VpIndex, Value2],
            ),
            missing2: DefectType::new(
                format!("{name}.missing2"),
                "Missing value parameter annotation in #2: [VALUE1]",
                &[Method, VpIndex, Value1],
            ),
        }
    }

    /// One defect per changed or one-sided row; unchanged rows yield nothing.
    fn classify(
        &self,
        diff: &ListDiff,
        base: &BTreeMap<AttributeKind, String>,
    ) -> Result<Vec<DefectInfo>> {
        let mut infos = Vec::new();
        for (left, right) in diff.rows() {
            let mut attributes = base.clone();
            let defect_type = if let (Some(v1), Some(v2)) =
                (left.strip_prefix("!= "), right.strip_prefix("!= "))
            {
                attributes.insert(AttributeKind::Value1, v1.to_string());
                attributes.insert(AttributeKind::Value2, v2.to_string());
                &self.mismatch
            } else if left == MISSING {
                let v2 = right.strip_prefix("+ ").unwrap_or(right);
                attributes.insert(AttributeKind::Value2, v2.to_string());
                &self.missing1
            } else if right == MISSING {
                let v1 = left.strip_prefix("+ ").unwrap_or(left);
                attributes.insert(AttributeKind::Value1, v1.to_string());
                &self.missing2
            } else {
                continue;
            };
            infos.push(DefectInfo::new(defect_type.clone(), attributes)?);
        }
        Ok(infos)
    }
}

/// Inputs shared by annotation checkers of one entity pair.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationScope<'a> {
    pub policies: &'a ExceptionPolicies,
    pub ignored: &'a [String],
    /// Access flags of both sides, when the nullability policy applies to this entity
    pub member_access: Option<(u32, u32)>,
}

impl AnnotationScope<'_> {
    fn diff(&self, anns1: &[AnnotationEntry], anns2: &[AnnotationEntry]) -> Option<ListDiff> {
        match self.member_access {
            Some((access1, access2)) => {
                let (f1, f2) = self
                    .policies
                    .filter_nullability(access1, access2, anns1, anns2);
                diff_annotations(&f1, &f2, self.ignored)
            }
            None => diff_annotations(anns1, anns2, self.ignored),
        }
    }
}

/// Compares one annotation list.
#[derive(Debug, Clone)]
pub struct AnnotationsChecker {
    name: String,
    property: String,
    index: usize,
    defects: AnnotationDefects,
}

impl AnnotationsChecker {
    fn new(prefix: &str, property: &str, index: usize) -> Self {
        let name = format!("{prefix}.{property}");
        Self {
            defects: AnnotationDefects::for_annotations(&name),
            name,
            property: property.to_string(),
            index,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(
        &self,
        scope: &AnnotationScope<'_>,
        entity1: &Entity,
        entity2: &Entity,
        report: &mut EntityReport,
    ) -> Result<()> {
        let Some(diff) = scope.diff(entity1.annotations(self.index), entity2.annotations(self.index))
        else {
            return Ok(());
        };
        for info in self.defects.classify(&diff, &BTreeMap::new())? {
            report.add_defect(info);
        }
        report.annotation_diffs.push(NamedListDiff {
            name: self.property.clone(),
            diff,
        });
        Ok(())
    }
}

/// Compares per-parameter annotation lists of a method.
#[derive(Debug, Clone)]
pub struct ParameterAnnotationsChecker {
    name: String,
    property: String,
    index: usize,
    defects: AnnotationDefects,
}

impl ParameterAnnotationsChecker {
    fn new(prefix: &str, property: &str, index: usize) -> Self {
        let name = format!("{prefix}.{property}");
        Self {
            defects: AnnotationDefects::for_parameters(&name),
            name,
            property: property.to_string(),
            index,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fails when a side carries annotations for more parameters than its
    /// descriptor declares.
    pub fn check(
        &self,
        scope: &AnnotationScope<'_>,
        method1: (&Entity, &str),
        method2: (&Entity, &str),
        report: &mut EntityReport,
    ) -> Result<()> {
        let params1 = method1.0.parameter_annotations(self.index);
        let params2 = method2.0.parameter_annotations(self.index);
        validate_parameter_lists(params1, method1.1)?;
        validate_parameter_lists(params2, method2.1)?;

        let method_id = method1.0.id.as_str();
        for i in 0..params1.len().max(params2.len()) {
            let anns1 = params1.get(i).map_or(&[][..], Vec::as_slice);
            let anns2 = params2.get(i).map_or(&[][..], Vec::as_slice);
            let Some(diff) = scope.diff(anns1, anns2) else {
                continue;
            };
            let base = attrs([
                (AttributeKind::Method, method_id),
                (AttributeKind::VpIndex, i.to_string().as_str()),
            ]);
            for info in self.defects.classify(&diff, &base)? {
                report.add_defect(info);
            }
            report.parameter_annotation_diffs.push(ParameterAnnotationDiff {
                name: self.property.clone(),
                index: i,
                diff,
            });
        }
        Ok(())
    }
}

fn validate_parameter_lists(params: &[Vec<AnnotationEntry>], desc: &str) -> Result<()> {
    if params.is_empty() {
        return Ok(());
    }
    let count = parameter_count(desc)
        .malformed_none(desc, "method descriptor does not parse")?;
    if params.len() > count {
        return Err(AbiCmpError::malformed(
            desc,
            format!(
                "{} parameter annotation lists for {count} parameters",
                params.len()
            ),
        ));
    }
    Ok(())
}

// ============================================================================
// List checkers
// ============================================================================

/// Which nested list of a class a [`ListChecker`] reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    InnerClasses,
    Methods,
    Fields,
}

/// Reconciles one nested list of two classes by id.
#[derive(Debug, Clone)]
pub struct ListChecker {
    kind: ListKind,
    missing1: DefectType,
    missing2: DefectType,
}

impl ListChecker {
    fn new(kind: ListKind) -> Self {
        let (name, attr, noun) = match kind {
            ListKind::InnerClasses => (INNER_CLASSES_CHECKER, AttributeKind::InnerClass, "inner class"),
            ListKind::Methods => (METHODS_CHECKER, AttributeKind::Method, "method"),
            ListKind::Fields => (FIELDS_CHECKER, AttributeKind::Field, "field"),
        };
        let placeholder = format!("[{}]", attr.id());
        Self {
            kind,
            missing1: DefectType::new(
                format!("{name}.missing1"),
                format!("Missing {noun} in #1: {placeholder}"),
                &[attr],
            ),
            missing2: DefectType::new(
                format!("{name}.missing2"),
                format!("Missing {noun} in #2: {placeholder}"),
                &[attr],
            ),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.kind {
            ListKind::InnerClasses => INNER_CLASSES_CHECKER,
            ListKind::Methods => METHODS_CHECKER,
            ListKind::Fields => FIELDS_CHECKER,
        }
    }

    const fn attribute(&self) -> AttributeKind {
        match self.kind {
            ListKind::InnerClasses => AttributeKind::InnerClass,
            ListKind::Methods => AttributeKind::Method,
            ListKind::Fields => AttributeKind::Field,
        }
    }

    pub fn check(
        &self,
        policies: &ExceptionPolicies,
        class1: &ClassNode,
        class2: &ClassNode,
        report: &mut EntityReport,
    ) -> Result<()> {
        let Some(diff) = (match self.kind {
            ListKind::InnerClasses => inner_class_diff(policies, class1, class2),
            ListKind::Methods => method_list_diff(policies, class1, class2),
            ListKind::Fields => field_list_diff(policies, class1, class2),
        }) else {
            return Ok(());
        };

        for id in diff.only_right() {
            let info = DefectInfo::new(self.missing1.clone(), attrs([(self.attribute(), id)]))?;
            report.add_defect(info);
        }
        for id in diff.only_left() {
            let info = DefectInfo::new(self.missing2.clone(), attrs([(self.attribute(), id)]))?;
            report.add_defect(info);
        }

        let rendered = match self.kind {
            ListKind::InnerClasses => {
                let lines1 = inner_class_lines(class1);
                let lines2 = inner_class_lines(class2);
                diff.map(
                    |id| lines1.get(id).cloned().unwrap_or_else(|| id.to_string()),
                    |id| lines2.get(id).cloned().unwrap_or_else(|| id.to_string()),
                )
            }
            ListKind::Methods => diff.map(
                |id| with_flags(id, &method_access(class1), flags::method_flags),
                |id| with_flags(id, &method_access(class2), flags::method_flags),
            ),
            ListKind::Fields => diff.map(
                |id| with_flags(id, &field_access(class1), flags::field_flags),
                |id| with_flags(id, &field_access(class2), flags::field_flags),
            ),
        };
        report.structure_diffs.push(NamedListDiff {
            name: self.name().to_string(),
            diff: rendered,
        });
        Ok(())
    }
}

fn with_flags(id: &str, access: &BTreeMap<String, u32>, render: fn(u32) -> String) -> String {
    match access.get(id) {
        Some(bits) => format!("{id} {}", render(*bits)),
        None => id.to_string(),
    }
}

fn method_access(class: &ClassNode) -> BTreeMap<String, u32> {
    class.methods.iter().map(|m| (m.id(), m.access)).collect()
}

fn field_access(class: &ClassNode) -> BTreeMap<String, u32> {
    class.fields.iter().map(|f| (f.id(), f.access)).collect()
}

/// Ids that are not ignored on at least one side, sorted per side.
fn relevant_ids(
    ids1: &BTreeMap<String, u32>,
    ids2: &BTreeMap<String, u32>,
    ignored: impl Fn(u32) -> bool,
) -> (Vec<String>, Vec<String>) {
    let relevant = |id: &String| {
        ids1.get(id).map_or(false, |a| !ignored(*a)) || ids2.get(id).map_or(false, |a| !ignored(*a))
    };
    let side1 = ids1.keys().filter(|id| relevant(id)).cloned().collect();
    let side2 = ids2.keys().filter(|id| relevant(id)).cloned().collect();
    (side1, side2)
}

fn method_list_diff(
    policies: &ExceptionPolicies,
    class1: &ClassNode,
    class2: &ClassNode,
) -> Option<ListDiff> {
    let (ids1, ids2) = relevant_ids(&method_access(class1), &method_access(class2), |a| {
        policies.is_ignored_member(a)
    });
    let diff = reconcile(&ids1, &ids2)?;
    if !policies.ignore_closure_converted {
        return Some(diff);
    }

    let find = |methods: &[MethodNode], id: &str| methods.iter().find(|m| m.id() == id).cloned();
    let mut kept = ListDiff::default();
    for (left, right) in diff.rows() {
        let converted = if right == MISSING {
            find(&class1.methods, left).map_or(false, |m| policies.is_closure_converted(&m, &class2.methods))
        } else {
            find(&class2.methods, right).map_or(false, |m| policies.is_closure_converted(&m, &class1.methods))
        };
        if !converted {
            kept.left.push(left.to_string());
            kept.right.push(right.to_string());
        }
    }
    (!kept.is_empty()).then_some(kept)
}

fn field_list_diff(
    policies: &ExceptionPolicies,
    class1: &ClassNode,
    class2: &ClassNode,
) -> Option<ListDiff> {
    let (ids1, ids2) = relevant_ids(&field_access(class1), &field_access(class2), |a| {
        policies.is_ignored_field(a)
    });
    reconcile(&ids1, &ids2)
}

fn listed_inner_classes(policies: &ExceptionPolicies, class: &ClassNode) -> BTreeMap<String, u32> {
    class
        .inner_classes
        .iter()
        .filter(|ic| !policies.is_ignored_inner_class(ic))
        .map(|ic| (ic.name.clone(), ic.access))
        .collect()
}

fn inner_class_diff(
    policies: &ExceptionPolicies,
    class1: &ClassNode,
    class2: &ClassNode,
) -> Option<ListDiff> {
    let (ids1, ids2) = relevant_ids(
        &listed_inner_classes(policies, class1),
        &listed_inner_classes(policies, class2),
        |a| policies.ignore_synthetic_members && flags::is_synthetic(a),
    );
    reconcile(&ids1, &ids2)
}

fn inner_class_lines(class: &ClassNode) -> BTreeMap<String, String> {
    class
        .inner_classes
        .iter()
        .map(|ic| (ic.name.clone(), inner_class_line(ic)))
        .collect()
}

/// `INNER_CLASS <name> <outer> <inner> <bits> <flags>`, absent names as `null`.
#[must_use]
pub fn inner_class_line(ic: &InnerClassNode) -> String {
    format!(
        "INNER_CLASS {} {} {} {:b} {}",
        ic.name,
        ic.outer_name.as_deref().unwrap_or("null"),
        ic.inner_name.as_deref().unwrap_or("null"),
        ic.access,
        flags::class_flags(ic.access)
    )
}

// ============================================================================
// Checker sets
// ============================================================================

/// A class-level checker.
#[derive(Debug, Clone)]
pub enum ClassChecker {
    Property(PropertyChecker),
    Annotations(AnnotationsChecker),
    List(ListChecker),
}

impl ClassChecker {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Property(c) => c.name(),
            Self::Annotations(c) => c.name(),
            Self::List(c) => c.name(),
        }
    }
}

/// A method- or field-level checker.
#[derive(Debug, Clone)]
pub enum MemberChecker {
    Property(PropertyChecker),
    Annotations(AnnotationsChecker),
    ParameterAnnotations(ParameterAnnotationsChecker),
}

impl MemberChecker {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Property(c) => c.name(),
            Self::Annotations(c) => c.name(),
            Self::ParameterAnnotations(c) => c.name(),
        }
    }
}

fn member_checkers<S>(
    registry: &PropertyRegistry<S>,
    config: &CheckerConfiguration,
) -> Vec<MemberChecker> {
    let prefix = registry.kind().prefix();
    let properties = registry
        .properties()
        .iter()
        .map(|p| MemberChecker::Property(PropertyChecker::new(prefix, p.name(), p.index())));
    let annotations = registry
        .annotation_properties()
        .iter()
        .map(|p| MemberChecker::Annotations(AnnotationsChecker::new(prefix, p.name(), p.index())));
    let parameters = registry.parameter_annotation_properties().iter().map(|p| {
        MemberChecker::ParameterAnnotations(ParameterAnnotationsChecker::new(
            prefix,
            p.name(),
            p.index(),
        ))
    });
    properties
        .chain(annotations)
        .chain(parameters)
        .filter(|c| config.is_enabled(c.name()))
        .collect()
}

/// The enabled checkers for each entity kind, in run order.
#[derive(Debug, Clone)]
pub struct CheckerSet {
    pub classes: Vec<ClassChecker>,
    pub methods: Vec<MemberChecker>,
    pub fields: Vec<MemberChecker>,
}

impl CheckerSet {
    /// Every checker name derivable from `schema`, in run order.
    #[must_use]
    pub fn known_names(schema: &Schema) -> Vec<String> {
        let mut names = schema.property_checker_names();
        names.extend(LIST_CHECKERS.iter().map(|s| (*s).to_string()));
        names
    }

    /// Fails with a configuration error if `config` names an unknown checker.
    pub fn build(schema: &Schema, config: &CheckerConfiguration) -> Result<Self> {
        config.validate(&Self::known_names(schema))?;

        let prefix = schema.classes.kind().prefix();
        let properties = schema
            .classes
            .properties()
            .iter()
            .map(|p| ClassChecker::Property(PropertyChecker::new(prefix, p.name(), p.index())));
        let annotations = schema
            .classes
            .annotation_properties()
            .iter()
            .map(|p| ClassChecker::Annotations(AnnotationsChecker::new(prefix, p.name(), p.index())));
        let lists = [ListKind::InnerClasses, ListKind::Methods, ListKind::Fields]
            .into_iter()
            .map(|k| ClassChecker::List(ListChecker::new(k)));
        let classes = properties
            .chain(annotations)
            .chain(lists)
            .filter(|c| config.is_enabled(c.name()))
            .collect();

        Ok(Self {
            classes,
            methods: member_checkers(&schema.methods, config),
            fields: member_checkers(&schema.fields, config),
        })
    }
}

/// Members of `class` keyed by id.
pub(crate) fn methods_by_id(class: &ClassNode) -> BTreeMap<String, &MethodNode> {
    class.methods.iter().map(|m| (m.id(), m)).collect()
}

pub(crate) fn fields_by_id(class: &ClassNode) -> BTreeMap<String, &FieldNode> {
    class.fields.iter().map(|f| (f.id(), f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::flags::{ACC_PRIVATE, ACC_PUBLIC, ACC_SYNTHETIC};
    use crate::model::{AnnotationNode, AnnotationValue};

    fn class_with_methods(methods: &[(&str, u32)]) -> ClassNode {
        let mut class = ClassNode::new(ACC_PUBLIC, "a/C");
        class.methods = methods
            .iter()
            .map(|(name, access)| MethodNode::new(*access, *name, "()V"))
            .collect();
        class
    }

    fn report() -> EntityReport {
        EntityReport::new(Location::class("x.jar", "a/C"))
    }

    #[test]
    fn test_method_list_checker() {
        let c1 = class_with_methods(&[("foo", ACC_PUBLIC), ("bar", ACC_PUBLIC)]);
        let c2 = class_with_methods(&[("foo", ACC_PUBLIC), ("baz", ACC_PUBLIC)]);
        let mut r = report();
        ListChecker::new(ListKind::Methods)
            .check(&ExceptionPolicies::default(), &c1, &c2, &mut r)
            .expect("check");

        let diff = &r.structure_diffs[0].diff;
        assert_eq!(diff.left, vec!["bar()V public", MISSING]);
        assert_eq!(diff.right, vec![MISSING, "baz()V public"]);
        let ids: Vec<_> = r.defects.defects().iter().map(|d| d.info.defect_type().id()).collect();
        assert_eq!(ids, vec!["class.methods.missing1", "class.methods.missing2"]);
        assert_eq!(
            r.defects.defects()[0].info.get(AttributeKind::Method),
            Some("baz()V")
        );
    }

    #[test]
    fn test_synthetic_only_members_dropped() {
        let c1 = class_with_methods(&[("access$0", ACC_SYNTHETIC)]);
        let c2 = class_with_methods(&[]);
        let mut r = report();
        ListChecker::new(ListKind::Methods)
            .check(&ExceptionPolicies::default(), &c1, &c2, &mut r)
            .expect("check");
        assert!(r.is_empty());

        ListChecker::new(ListKind::Methods)
            .check(&ExceptionPolicies::none(), &c1, &c2, &mut r)
            .expect("check");
        assert!(!r.is_empty());
    }

    #[test]
    fn test_closure_converted_suppressed() {
        let c1 = class_with_methods(&[("compute", ACC_PRIVATE)]);
        let c2 = class_with_methods(&[("compute$lambda", ACC_PRIVATE)]);
        let policies = ExceptionPolicies {
            ignore_closure_converted: true,
            ..ExceptionPolicies::default()
        };
        let diff = method_list_diff(&policies, &c1, &c2).expect("diff");
        assert_eq!(diff.left, vec![MISSING]);
        assert_eq!(diff.right, vec!["compute$lambda()V"]);
    }

    #[test]
    fn test_inner_class_line() {
        let ic = InnerClassNode {
            name: "a/C$D".to_string(),
            outer_name: Some("a/C".to_string()),
            inner_name: Some("D".to_string()),
            access: ACC_PUBLIC,
        };
        assert_eq!(inner_class_line(&ic), "INNER_CLASS a/C$D a/C D 1 public");
    }

    #[test]
    fn test_annotation_classification() {
        let defects = AnnotationDefects::for_annotations("method.visibleAnnotations");
        let diff = ListDiff {
            left: vec!["!= @La/A;( x: 1 )".into(), "+ @Lb/B;".into(), "== @Lc/C;".into()],
            right: vec!["!= @La/A;( x: 2 )".into(), MISSING.into(), "== @Lc/C;".into()],
        };
        let infos = defects.classify(&diff, &BTreeMap::new()).expect("complete");
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].message(), "[method.visibleAnnotations.mismatch] Annotations mismatch: @La/A;( x: 1 ) != @La/A;( x: 2 )");
        assert_eq!(infos[1].message(), "[method.visibleAnnotations.missing2] Missing annotation in #2: @Lb/B;");
    }

    #[test]
    fn test_parameter_annotation_count_validated() {
        let schema = Schema::standard().expect("schema");
        let mut method = MethodNode::new(ACC_PUBLIC, "m", "(I)V");
        method.visible_parameter_annotations = vec![
            vec![AnnotationNode::new("La/A;")],
            vec![AnnotationNode::new("La/B;").with_value("v", AnnotationValue::Int(1))],
        ];
        let e = schema.methods.extract(method.id(), &method);
        let checker = ParameterAnnotationsChecker::new("method", "visibleParameterAnnotations", 0);
        let policies = ExceptionPolicies::default();
        let scope = AnnotationScope {
            policies: &policies,
            ignored: &[],
            member_access: None,
        };
        let mut r = report();
        let err = checker
            .check(&scope, (&e, "(I)V"), (&e, "(I)V"), &mut r)
            .expect_err("two lists for one parameter");
        assert!(!err.is_config());
        assert!(err.cause().contains("2 parameter annotation lists for 1 parameters"));

        let err = checker
            .check(&scope, (&e, "(I"), (&e, "(I)V"), &mut r)
            .expect_err("unterminated descriptor");
        assert!(!err.is_config());
        assert!(err.cause().contains("method descriptor does not parse"));
    }

    #[test]
    fn test_checker_configuration() {
        let schema = Schema::standard().expect("schema");
        let config = CheckerConfiguration::enable_exclusively(["class.access", "class.methods"]);
        let set = CheckerSet::build(&schema, &config).expect("known names");
        let names: Vec<_> = set.classes.iter().map(ClassChecker::name).collect();
        assert_eq!(names, vec!["class.access", "class.methods"]);
        assert!(set.methods.is_empty());

        let unknown = CheckerConfiguration::all().disable(["class.nope"]);
        let err = CheckerSet::build(&schema, &unknown).expect_err("unknown checker");
        assert!(err.is_config());
    }

    #[test]
    fn test_all_checkers_by_default() {
        let schema = Schema::standard().expect("schema");
        let set = CheckerSet::build(&schema, &CheckerConfiguration::all()).expect("build");
        assert_eq!(set.classes.len(), 10 + 2 + 3);
        assert_eq!(set.methods.len(), 6 + 2 + 2);
        assert_eq!(set.fields.len(), 5 + 2);
    }
}
