//! Class comparison engine.

use super::annotations::DEFAULT_IGNORED_ANNOTATIONS;
use super::checkers::{
    fields_by_id, methods_by_id, AnnotationScope, CheckerConfiguration, CheckerSet, ClassChecker,
    EntityReport, MemberChecker,
};
use super::policy::ExceptionPolicies;
use super::result::{ContainerDiff, MemberDiff, PropertyDiff};
use crate::defects::{AttributeKind, DefectInfo, DefectReport, DefectType, Location};
use crate::error::{OptionContext, Result};
use crate::model::{flags, ClassNode, Entity, EntityKind, PropertyRegistry, Schema};
use std::collections::BTreeMap;

/// Outcome of comparing one class pair.
#[derive(Debug, Clone, Default)]
pub struct ClassComparison {
    /// `None` when the classes are equivalent under the enabled checkers
    pub diff: Option<ContainerDiff>,
    pub defects: DefectReport,
}

/// Builder for [`ClassComparer`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ClassComparerBuilder {
    checkers: CheckerConfiguration,
    policies: ExceptionPolicies,
    ignored_annotations: Vec<String>,
}

impl Default for ClassComparerBuilder {
    fn default() -> Self {
        Self {
            checkers: CheckerConfiguration::all(),
            policies: ExceptionPolicies::default(),
            ignored_annotations: DEFAULT_IGNORED_ANNOTATIONS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl ClassComparerBuilder {
    pub fn checkers(mut self, checkers: CheckerConfiguration) -> Self {
        self.checkers = checkers;
        self
    }

    pub fn policies(mut self, policies: ExceptionPolicies) -> Self {
        self.policies = policies;
        self
    }

    pub fn ignored_annotations(mut self, descriptors: Vec<String>) -> Self {
        self.ignored_annotations = descriptors;
        self
    }

    /// Build registries and checkers. Every configuration error surfaces here.
    pub fn build(self) -> Result<ClassComparer> {
        let schema = Schema::standard()?;
        let checkers = CheckerSet::build(&schema, &self.checkers)?;
        Ok(ClassComparer {
            schema,
            checkers,
            policies: self.policies,
            ignored_annotations: self.ignored_annotations,
            failure: DefectType::new(
                "compare.failed",
                "Comparison failed: [VALUE1]",
                &[AttributeKind::Value1],
            ),
        })
    }
}

/// Compares class pairs with a fixed schema, checker set and policies.
///
/// Immutable once built and shared by every worker of a run.
pub struct ClassComparer {
    schema: Schema,
    checkers: CheckerSet,
    policies: ExceptionPolicies,
    ignored_annotations: Vec<String>,
    failure: DefectType,
}

impl ClassComparer {
    pub fn builder() -> ClassComparerBuilder {
        ClassComparerBuilder::default()
    }

    /// Comparer with all checkers and default policies.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    #[must_use]
    pub const fn policies(&self) -> &ExceptionPolicies {
        &self.policies
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub const fn checkers(&self) -> &CheckerSet {
        &self.checkers
    }

    /// Compare two versions of a class found in `archive`.
    ///
    /// A checker failing on malformed input is recorded on the entity it was
    /// checking; only configuration errors are returned.
    pub fn compare(
        &self,
        archive: &str,
        class1: &ClassNode,
        class2: &ClassNode,
    ) -> Result<ClassComparison> {
        tracing::debug!(class = %class1.name, archive, "Comparing class");

        let class_location = Location::class(archive, &class1.name);
        let mut report = EntityReport::new(class_location.clone());
        let entity1 = self.schema.classes.extract(&class1.name, class1);
        let entity2 = self.schema.classes.extract(&class2.name, class2);
        let scope = AnnotationScope {
            policies: &self.policies,
            ignored: &self.ignored_annotations,
            member_access: None,
        };

        for checker in &self.checkers.classes {
            let outcome = match checker {
                ClassChecker::Property(c) => {
                    c.check(&self.schema.classes, &entity1, &entity2, &mut report)
                }
                ClassChecker::Annotations(c) => c.check(&scope, &entity1, &entity2, &mut report),
                ClassChecker::List(c) => c.check(&self.policies, class1, class2, &mut report),
            };
            self.isolate(checker.name(), outcome, &mut report)?;
        }

        let mut member_diffs = Vec::new();
        if !self.checkers.methods.is_empty() {
            let methods1 = methods_by_id(class1);
            let methods2 = methods_by_id(class2);
            for (id, m1) in &methods1 {
                let Some(m2) = methods2.get(id) else { continue };
                if self.policies.is_ignored_member(m1.access)
                    && self.policies.is_ignored_member(m2.access)
                {
                    continue;
                }
                let location = class_location
                    .method(id.as_str())
                    .malformed_none(&class1.name, "method outside a class")?;
                let pair = MemberPair {
                    registry: &self.schema.methods,
                    checkers: &self.checkers.methods,
                    entity1: self.schema.methods.extract(id, *m1),
                    entity2: self.schema.methods.extract(id, *m2),
                    access: (m1.access, m2.access),
                    descs: (&m1.desc, &m2.desc),
                };
                member_diffs.push(self.compare_member(&pair, location, &mut report)?);
            }
        }

        if !self.checkers.fields.is_empty() {
            let fields1 = fields_by_id(class1);
            let fields2 = fields_by_id(class2);
            for (id, f1) in &fields1 {
                let Some(f2) = fields2.get(id) else { continue };
                if self.policies.is_ignored_field(f1.access)
                    && self.policies.is_ignored_field(f2.access)
                {
                    continue;
                }
                let location = class_location
                    .field(id.as_str())
                    .malformed_none(&class1.name, "field outside a class")?;
                let pair = MemberPair {
                    registry: &self.schema.fields,
                    checkers: &self.checkers.fields,
                    entity1: self.schema.fields.extract(id, *f1),
                    entity2: self.schema.fields.extract(id, *f2),
                    access: (f1.access, f2.access),
                    descs: (&f1.desc, &f2.desc),
                };
                member_diffs.push(self.compare_member(&pair, location, &mut report)?);
            }
        }
        member_diffs.retain(|m| !m.is_empty());

        let EntityReport {
            property_diffs,
            annotation_diffs,
            structure_diffs,
            defects,
            ..
        } = report;
        let diff = ContainerDiff {
            name: class1.name.clone(),
            info1: flags::class_flags(class1.access),
            info2: flags::class_flags(class2.access),
            property_diffs,
            annotation_diffs,
            structure_diffs,
            member_diffs,
        };
        Ok(ClassComparison {
            diff: (!diff.is_empty()).then_some(diff),
            defects,
        })
    }

    fn compare_member<S>(
        &self,
        pair: &MemberPair<'_, S>,
        location: Location,
        class_report: &mut EntityReport,
    ) -> Result<MemberDiff> {
        let mut report = EntityReport::new(location);
        let scope = AnnotationScope {
            policies: &self.policies,
            ignored: &self.ignored_annotations,
            member_access: Some(pair.access),
        };
        for checker in pair.checkers {
            let outcome = match checker {
                MemberChecker::Property(c) => {
                    c.check(pair.registry, &pair.entity1, &pair.entity2, &mut report)
                }
                MemberChecker::Annotations(c) => {
                    c.check(&scope, &pair.entity1, &pair.entity2, &mut report)
                }
                MemberChecker::ParameterAnnotations(c) => c.check(
                    &scope,
                    (&pair.entity1, pair.descs.0),
                    (&pair.entity2, pair.descs.1),
                    &mut report,
                ),
            };
            self.isolate(checker.name(), outcome, &mut report)?;
        }

        let kind = pair.registry.kind();
        let render: fn(u32) -> String = match kind {
            EntityKind::Field => flags::field_flags,
            _ => flags::method_flags,
        };
        let EntityReport {
            property_diffs,
            annotation_diffs,
            parameter_annotation_diffs,
            defects,
            ..
        } = report;
        class_report.defects.extend(defects);
        Ok(MemberDiff {
            kind,
            id: pair.entity1.id.clone(),
            info1: render(pair.access.0),
            info2: render(pair.access.1),
            property_diffs,
            annotation_diffs,
            parameter_annotation_diffs,
        })
    }

    /// Turn a non-configuration checker error into a finding on `report`.
    fn isolate(&self, checker: &str, outcome: Result<()>, report: &mut EntityReport) -> Result<()> {
        let err = match outcome {
            Ok(()) => return Ok(()),
            Err(err) if err.is_config() => return Err(err),
            Err(err) => err,
        };
        let cause = err.cause();
        tracing::warn!(
            checker,
            location = %report.location(),
            "Checker failed: {cause}"
        );
        let text = format!("comparison failed: {cause}");
        report.add_property_diff(PropertyDiff {
            property: checker.to_string(),
            value1: text.clone(),
            value2: text,
        });
        let info = DefectInfo::new(
            self.failure.clone(),
            BTreeMap::from([(AttributeKind::Value1, cause)]),
        )?;
        report.add_defect(info);
        Ok(())
    }
}

struct MemberPair<'a, S> {
    registry: &'a PropertyRegistry<S>,
    checkers: &'a [MemberChecker],
    entity1: Entity,
    entity2: Entity,
    access: (u32, u32),
    descs: (&'a str, &'a str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::MISSING;
    use crate::model::flags::{ACC_PRIVATE, ACC_PUBLIC, ACC_SUPER, ACC_SYNTHETIC};
    use crate::model::{AnnotationNode, FieldNode, MethodNode};

    fn class(methods: &[&str]) -> ClassNode {
        let mut node = ClassNode::new(ACC_PUBLIC | ACC_SUPER, "a/C");
        node.methods = methods
            .iter()
            .map(|m| MethodNode::new(ACC_PUBLIC, *m, "()V"))
            .collect();
        node
    }

    #[test]
    fn test_identical_classes() {
        let comparer = ClassComparer::new().expect("default comparer");
        let c = class(&["foo"]);
        let result = comparer.compare("x.jar", &c, &c.clone()).expect("compare");
        assert!(result.diff.is_none());
        assert!(result.defects.is_empty());
    }

    #[test]
    fn test_member_list_and_recursion() {
        let comparer = ClassComparer::new().expect("default comparer");
        let c1 = class(&["foo", "bar"]);
        let mut c2 = class(&["foo", "baz"]);
        c2.methods[0].access = ACC_PUBLIC | crate::model::flags::ACC_FINAL;

        let diff = comparer
            .compare("x.jar", &c1, &c2)
            .expect("compare")
            .diff
            .expect("differences");
        let methods = diff.structure("class.methods").expect("method list differs");
        assert_eq!(methods.left, vec!["bar()V public", MISSING]);
        assert_eq!(methods.right, vec![MISSING, "baz()V public"]);

        let foo: Vec<_> = diff.members_of(EntityKind::Method).collect();
        assert_eq!(foo.len(), 1);
        assert_eq!(foo[0].id, "foo()V");
        assert_eq!(foo[0].property_diffs[0].property, "access");
        assert_eq!(foo[0].property_diffs[0].value2, "10001 public final");
    }

    #[test]
    fn test_synthetic_on_both_sides_not_compared() {
        let comparer = ClassComparer::new().expect("default comparer");
        let mut c1 = class(&[]);
        let mut c2 = class(&[]);
        c1.methods.push(MethodNode::new(ACC_SYNTHETIC, "access$0", "()V"));
        let mut changed = MethodNode::new(ACC_SYNTHETIC | ACC_PRIVATE, "access$0", "()V");
        changed.exceptions.push("java/io/IOException".to_string());
        c2.methods.push(changed);
        let result = comparer.compare("x.jar", &c1, &c2).expect("compare");
        assert!(result.diff.is_none());
    }

    #[test]
    fn test_malformed_member_is_isolated() {
        let comparer = ClassComparer::new().expect("default comparer");
        let mut broken = MethodNode::new(ACC_PUBLIC, "m", "(I");
        broken.visible_parameter_annotations = vec![vec![AnnotationNode::new("La/A;")]];
        let mut c1 = class(&["ok"]);
        c1.methods.push(broken.clone());
        c1.fields.push(FieldNode::new(ACC_PUBLIC, "x", "I"));
        let mut c2 = c1.clone();
        c2.fields[0].access = ACC_PRIVATE;

        let result = comparer.compare("x.jar", &c1, &c2).expect("isolated");
        let diff = result.diff.expect("failure recorded");
        let m: Vec<_> = diff.members_of(EntityKind::Method).collect();
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].property_diffs[0].property, "method.visibleParameterAnnotations");
        assert!(m[0].property_diffs[0].value1.starts_with("comparison failed: "));
        // sibling field still compared
        assert_eq!(diff.members_of(EntityKind::Field).count(), 1);

        let failed: Vec<_> = result
            .defects
            .defects()
            .iter()
            .filter(|d| d.info.defect_type().id() == "compare.failed")
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed[0].location,
            Location::Method {
                archive: "x.jar".to_string(),
                class: "a/C".to_string(),
                method: "m(I".to_string(),
            }
        );
    }

    #[test]
    fn test_nullability_on_private_fields_ignored() {
        let comparer = ClassComparer::new().expect("default comparer");
        let mut c1 = class(&[]);
        c1.fields.push(FieldNode::new(ACC_PRIVATE, "x", "Ljava/lang/String;"));
        let mut c2 = c1.clone();
        c2.fields[0]
            .invisible_annotations
            .push(AnnotationNode::new("Lorg/jetbrains/annotations/NotNull;"));
        assert!(comparer.compare("x.jar", &c1, &c2).expect("compare").diff.is_none());

        let strict = ClassComparer::builder()
            .policies(ExceptionPolicies::none())
            .build()
            .expect("comparer");
        assert!(strict.compare("x.jar", &c1, &c2).expect("compare").diff.is_some());
    }

    #[test]
    fn test_unknown_checker_rejected_at_build() {
        let result = ClassComparer::builder()
            .checkers(CheckerConfiguration::enable_exclusively(["method.nope"]))
            .build();
        assert!(matches!(result, Err(e) if e.is_config()));
    }
}
