//! End-to-end tests of the class comparison engine.
//!
//! Each test builds two versions of a class in memory, runs a
//! [`ClassComparer`] over them and checks both the diff tree and the
//! classified defects.

use abicmp::defects::{AttributeKind, DefectReport, Location, SummaryReport};
use abicmp::diff::{
    diff_annotations, CheckerConfiguration, ClassComparer, ClassComparison, ExceptionPolicies,
    MISSING,
};
use abicmp::model::flags::{
    ACC_BRIDGE, ACC_FINAL, ACC_PRIVATE, ACC_PUBLIC, ACC_STATIC, ACC_SUPER, ACC_SYNTHETIC,
};
use abicmp::model::{
    AnnotationEntry, AnnotationNode, AnnotationValue, ClassNode, EntityKind, FieldNode,
    InnerClassNode, MethodNode,
};

// ============================================================================
// Helpers
// ============================================================================

fn class_with_methods(methods: &[(u32, &str, &str)]) -> ClassNode {
    let mut class = ClassNode::new(ACC_PUBLIC | ACC_SUPER, "com/example/Api");
    class.methods = methods
        .iter()
        .map(|(access, name, desc)| MethodNode::new(*access, *name, *desc))
        .collect();
    class
}

fn compare(comparer: &ClassComparer, c1: &ClassNode, c2: &ClassNode) -> ClassComparison {
    comparer.compare("api.jar", c1, c2).expect("comparison runs")
}

fn defect_ids(defects: &DefectReport) -> Vec<&str> {
    defects
        .defects()
        .iter()
        .map(|d| d.info.defect_type().id())
        .collect()
}

fn with_closure_policy() -> ClassComparer {
    ClassComparer::builder()
        .policies(ExceptionPolicies {
            ignore_closure_converted: true,
            ..ExceptionPolicies::default()
        })
        .build()
        .expect("comparer")
}

// ============================================================================
// Member lists and recursion
// ============================================================================

mod member_lists {
    use super::*;

    #[test]
    fn added_and_removed_methods_with_recursion_into_common() {
        let comparer = ClassComparer::new().expect("comparer");
        let c1 = class_with_methods(&[(ACC_PUBLIC, "foo", "()V"), (ACC_PUBLIC, "bar", "()V")]);
        let mut c2 = class_with_methods(&[(ACC_PUBLIC, "foo", "()V"), (ACC_PUBLIC, "baz", "()V")]);
        c2.methods[0].signature = Some("<T:Ljava/lang/Object;>()V".to_string());

        let result = compare(&comparer, &c1, &c2);
        let diff = result.diff.expect("classes differ");

        let methods = diff.structure("class.methods").expect("method list differs");
        assert_eq!(methods.only_left().collect::<Vec<_>>(), vec!["bar()V public"]);
        assert_eq!(methods.only_right().collect::<Vec<_>>(), vec!["baz()V public"]);
        assert!(methods.rows().all(|(l, r)| !l.starts_with("foo") && !r.starts_with("foo")));

        let members: Vec<_> = diff.members_of(EntityKind::Method).collect();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "foo()V");
        assert_eq!(members[0].property_diffs[0].property, "signature");

        let missing: Vec<_> = result
            .defects
            .defects()
            .iter()
            .filter(|d| d.info.defect_type().id().starts_with("class.methods."))
            .map(|d| {
                (
                    d.info.defect_type().id(),
                    d.info.get(AttributeKind::Method).unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            missing,
            vec![
                ("class.methods.missing1", "baz()V"),
                ("class.methods.missing2", "bar()V"),
            ]
        );
    }

    #[test]
    fn member_defects_carry_member_locations() {
        let comparer = ClassComparer::new().expect("comparer");
        let c1 = class_with_methods(&[(ACC_PUBLIC, "run", "()V")]);
        let c2 = class_with_methods(&[(ACC_PUBLIC | ACC_FINAL, "run", "()V")]);

        let result = compare(&comparer, &c1, &c2);
        let access = result
            .defects
            .defects()
            .iter()
            .find(|d| d.info.defect_type().id() == "method.access")
            .expect("access defect");
        assert_eq!(
            access.location,
            Location::Method {
                archive: "api.jar".to_string(),
                class: "com/example/Api".to_string(),
                method: "run()V".to_string(),
            }
        );
    }

    #[test]
    fn synthetic_members_left_out_of_lists() {
        let comparer = ClassComparer::new().expect("comparer");
        let c1 = class_with_methods(&[(ACC_PUBLIC, "foo", "()V")]);
        let c2 = class_with_methods(&[
            (ACC_PUBLIC, "foo", "()V"),
            (ACC_STATIC | ACC_SYNTHETIC, "access$000", "()V"),
        ]);
        assert!(compare(&comparer, &c1, &c2).diff.is_none());

        let strict = ClassComparer::builder()
            .policies(ExceptionPolicies::none())
            .build()
            .expect("comparer");
        let diff = compare(&strict, &c1, &c2).diff.expect("synthetic listed");
        let methods = diff.structure("class.methods").expect("method list differs");
        assert_eq!(
            methods.only_right().collect::<Vec<_>>(),
            vec!["access$000()V static synthetic"]
        );
    }

    #[test]
    fn bridge_methods_follow_their_policy() {
        let c1 = class_with_methods(&[(ACC_PUBLIC, "get", "()Ljava/lang/String;")]);
        let c2 = class_with_methods(&[
            (ACC_PUBLIC, "get", "()Ljava/lang/String;"),
            (ACC_PUBLIC | ACC_BRIDGE, "get", "()Ljava/lang/Object;"),
        ]);

        let default = ClassComparer::new().expect("comparer");
        assert!(compare(&default, &c1, &c2).diff.is_some());

        let ignoring = ClassComparer::builder()
            .policies(ExceptionPolicies {
                ignore_bridge_methods: true,
                ..ExceptionPolicies::default()
            })
            .build()
            .expect("comparer");
        assert!(compare(&ignoring, &c1, &c2).diff.is_none());
    }

    #[test]
    fn public_fields_only_hides_private_field_changes() {
        let mut c1 = ClassNode::new(ACC_PUBLIC, "com/example/Holder");
        c1.fields.push(FieldNode::new(ACC_PRIVATE, "cache", "Ljava/util/Map;"));
        c1.fields.push(FieldNode::new(ACC_PUBLIC, "VALUE", "I"));
        let mut c2 = ClassNode::new(ACC_PUBLIC, "com/example/Holder");
        c2.fields.push(FieldNode::new(ACC_PUBLIC, "VALUE", "I"));

        let default = ClassComparer::new().expect("comparer");
        let diff = compare(&default, &c1, &c2).diff.expect("field removed");
        let fields = diff.structure("class.fields").expect("field list differs");
        assert_eq!(
            fields.only_left().collect::<Vec<_>>(),
            vec!["cache:Ljava/util/Map; private"]
        );

        let public_only = ClassComparer::builder()
            .policies(ExceptionPolicies {
                public_fields_only: true,
                ..ExceptionPolicies::default()
            })
            .build()
            .expect("comparer");
        assert!(compare(&public_only, &c1, &c2).diff.is_none());
    }
}

// ============================================================================
// Closure-converted methods
// ============================================================================

mod closure_converted {
    use super::*;

    fn pair() -> (ClassNode, ClassNode) {
        let c1 = class_with_methods(&[
            (ACC_PUBLIC, "api", "()V"),
            (ACC_PRIVATE, "compute", "(I)I"),
        ]);
        let c2 = class_with_methods(&[
            (ACC_PUBLIC, "api", "()V"),
            (ACC_PRIVATE | ACC_STATIC, "compute$lambda$0", "(I)I"),
        ]);
        (c1, c2)
    }

    #[test]
    fn missing_private_method_suppressed_when_enabled() {
        let (c1, c2) = pair();
        let result = compare(&with_closure_policy(), &c1, &c2);

        let ids = defect_ids(&result.defects);
        assert!(!ids.contains(&"class.methods.missing2"), "{ids:?}");

        let diff = result.diff.expect("lambda method still listed");
        let methods = diff.structure("class.methods").expect("method list");
        assert_eq!(methods.only_left().count(), 0);
        assert_eq!(
            methods.only_right().collect::<Vec<_>>(),
            vec!["compute$lambda$0(I)I private static"]
        );
    }

    #[test]
    fn missing_private_method_reported_by_default() {
        let (c1, c2) = pair();
        let result = compare(&ClassComparer::new().expect("comparer"), &c1, &c2);
        let missing: Vec<_> = result
            .defects
            .defects()
            .iter()
            .filter(|d| d.info.defect_type().id() == "class.methods.missing2")
            .map(|d| d.info.get(AttributeKind::Method).unwrap_or_default())
            .collect();
        assert_eq!(missing, vec!["compute(I)I"]);
    }

    #[test]
    fn public_methods_never_treated_as_converted() {
        let c1 = class_with_methods(&[(ACC_PUBLIC, "compute", "()V")]);
        let c2 = class_with_methods(&[(ACC_PRIVATE, "compute$lambda", "()V")]);
        let result = compare(&with_closure_policy(), &c1, &c2);
        assert!(defect_ids(&result.defects).contains(&"class.methods.missing2"));
    }
}

// ============================================================================
// Annotations
// ============================================================================

mod annotations {
    use super::*;

    #[test]
    fn changed_and_unchanged_annotations() {
        let side1 = vec![
            AnnotationEntry::new("Lcom/example/Anno1;").with_value("x", AnnotationValue::Int(1)),
            AnnotationEntry::new("Lcom/example/Anno2;"),
        ];
        let side2 = vec![
            AnnotationEntry::new("Lcom/example/Anno2;"),
            AnnotationEntry::new("Lcom/example/Anno1;").with_value("x", AnnotationValue::Int(2)),
        ];

        let diff = diff_annotations(&side1, &side2, &[]).expect("Anno1 changed");
        let rows: Vec<_> = diff.rows().collect();
        assert_eq!(
            rows,
            vec![
                ("!= @Lcom/example/Anno1;( x: 1 )", "!= @Lcom/example/Anno1;( x: 2 )"),
                ("== @Lcom/example/Anno2;", "== @Lcom/example/Anno2;"),
            ]
        );

        assert!(diff_annotations(&side1, &side1, &[]).is_none());
    }

    #[test]
    fn ignored_descriptors_never_reported() {
        let mut c1 = ClassNode::new(ACC_PUBLIC, "com/example/K");
        c1.visible_annotations.push(
            AnnotationNode::new("Lkotlin/Metadata;").with_value("mv", AnnotationValue::Int(1)),
        );
        let mut c2 = c1.clone();
        c2.visible_annotations[0] =
            AnnotationNode::new("Lkotlin/Metadata;").with_value("mv", AnnotationValue::Int(2));

        let comparer = ClassComparer::new().expect("comparer");
        assert!(compare(&comparer, &c1, &c2).diff.is_none());
    }

    #[test]
    fn class_annotation_added() {
        let c1 = ClassNode::new(ACC_PUBLIC, "com/example/Api");
        let mut c2 = c1.clone();
        c2.visible_annotations
            .push(AnnotationNode::new("Ljava/lang/Deprecated;"));

        let result = compare(&ClassComparer::new().expect("comparer"), &c1, &c2);
        let diff = result.diff.expect("annotation added");
        assert_eq!(diff.annotation_diffs[0].name, "visibleAnnotations");
        assert_eq!(diff.annotation_diffs[0].diff.left, vec![MISSING]);
        assert_eq!(
            diff.annotation_diffs[0].diff.right,
            vec!["+ @Ljava/lang/Deprecated;"]
        );
        let missing = &result.defects.defects()[0];
        assert_eq!(
            missing.info.defect_type().id(),
            "class.visibleAnnotations.missing1"
        );
        assert_eq!(
            missing.info.get(AttributeKind::Value2),
            Some("@Ljava/lang/Deprecated;")
        );
    }

    #[test]
    fn parameter_annotation_added_on_public_method() {
        let mut c1 = class_with_methods(&[(ACC_PUBLIC, "greet", "(Ljava/lang/String;I)V")]);
        c1.methods[0].invisible_parameter_annotations = vec![vec![], vec![]];
        let mut c2 = c1.clone();
        c2.methods[0].invisible_parameter_annotations = vec![
            vec![AnnotationNode::new("Lorg/jetbrains/annotations/NotNull;")],
            vec![],
        ];

        let result = compare(&ClassComparer::new().expect("comparer"), &c1, &c2);
        let diff = result.diff.expect("parameter annotation added");
        let member = diff.members_of(EntityKind::Method).next().expect("greet");
        assert_eq!(member.parameter_annotation_diffs.len(), 1);
        assert_eq!(member.parameter_annotation_diffs[0].index, 0);
        assert_eq!(
            member.parameter_annotation_diffs[0].name,
            "invisibleParameterAnnotations"
        );

        let defect = result
            .defects
            .defects()
            .iter()
            .find(|d| d.info.defect_type().id() == "method.invisibleParameterAnnotations.missing1")
            .expect("classified");
        assert_eq!(defect.info.get(AttributeKind::VpIndex), Some("0"));
        assert_eq!(
            defect.info.get(AttributeKind::Method),
            Some("greet(Ljava/lang/String;I)V")
        );
    }

    #[test]
    fn nullability_on_private_method_suppressed() {
        let mut c1 = class_with_methods(&[(ACC_PRIVATE, "helper", "()Ljava/lang/String;")]);
        let mut c2 = c1.clone();
        c2.methods[0]
            .invisible_annotations
            .push(AnnotationNode::new("Lorg/jetbrains/annotations/Nullable;"));
        assert!(compare(&ClassComparer::new().expect("comparer"), &c1, &c2)
            .diff
            .is_none());

        c1.methods[0].access = ACC_PUBLIC;
        c2.methods[0].access = ACC_PUBLIC;
        assert!(compare(&ClassComparer::new().expect("comparer"), &c1, &c2)
            .diff
            .is_some());
    }
}

// ============================================================================
// Inner classes
// ============================================================================

mod inner_classes {
    use super::*;

    fn inner(name: &str, inner_name: Option<&str>) -> InnerClassNode {
        InnerClassNode {
            name: name.to_string(),
            outer_name: Some("com/example/Api".to_string()),
            inner_name: inner_name.map(str::to_string),
            access: ACC_PUBLIC | ACC_STATIC,
        }
    }

    #[test]
    fn added_inner_class_listed_with_details() {
        let c1 = ClassNode::new(ACC_PUBLIC, "com/example/Api");
        let mut c2 = c1.clone();
        c2.inner_classes.push(inner("com/example/Api$Builder", Some("Builder")));

        let result = compare(&ClassComparer::new().expect("comparer"), &c1, &c2);
        let diff = result.diff.expect("inner class added");
        let list = diff.structure("class.innerClasses").expect("inner list differs");
        let added: Vec<_> = list.only_right().collect();
        assert_eq!(added.len(), 1);
        assert!(added[0].starts_with("INNER_CLASS com/example/Api$Builder com/example/Api Builder"));
        assert!(defect_ids(&result.defects).contains(&"class.innerClasses.missing1"));
    }

    #[test]
    fn when_mappings_and_anonymous_entries_ignored() {
        let c1 = ClassNode::new(ACC_PUBLIC, "com/example/Api");
        let mut c2 = c1.clone();
        c2.inner_classes
            .push(inner("com/example/Api$WhenMappings", Some("WhenMappings")));
        c2.inner_classes.push(inner("com/example/Api$1", None));

        let result = compare(&ClassComparer::new().expect("comparer"), &c1, &c2);
        assert!(result.diff.is_none());
    }
}

// ============================================================================
// Checker selection
// ============================================================================

mod checker_selection {
    use super::*;

    #[test]
    fn exclusive_checkers_limit_findings() {
        let comparer = ClassComparer::builder()
            .checkers(CheckerConfiguration::enable_exclusively(["class.access"]))
            .build()
            .expect("comparer");
        let c1 = class_with_methods(&[(ACC_PUBLIC, "foo", "()V")]);
        let mut c2 = class_with_methods(&[(ACC_PUBLIC, "bar", "()V")]);
        assert!(compare(&comparer, &c1, &c2).diff.is_none());

        c2.access |= ACC_FINAL;
        let result = compare(&comparer, &c1, &c2);
        assert_eq!(defect_ids(&result.defects), vec!["class.access"]);
    }

    #[test]
    fn disabled_checker_skipped() {
        let comparer = ClassComparer::builder()
            .checkers(CheckerConfiguration::all().disable(["class.version"]))
            .build()
            .expect("comparer");
        let mut c1 = ClassNode::new(ACC_PUBLIC, "com/example/Api");
        c1.version = 52;
        let mut c2 = c1.clone();
        c2.version = 61;
        assert!(compare(&comparer, &c1, &c2).diff.is_none());
    }

    #[test]
    fn unknown_checker_is_configuration_error() {
        let err = ClassComparer::builder()
            .checkers(CheckerConfiguration::all().disable(["class.colour"]))
            .build()
            .err()
            .expect("unknown name rejected");
        assert!(err.is_config());
    }
}

// ============================================================================
// Defect aggregation
// ============================================================================

mod aggregation {
    use super::*;

    #[test]
    fn same_change_in_two_archives_clusters() {
        let comparer = ClassComparer::new().expect("comparer");
        let c1 = class_with_methods(&[(ACC_PUBLIC, "foo", "()V"), (ACC_PUBLIC, "bar", "()V")]);
        let c2 = class_with_methods(&[(ACC_PUBLIC, "foo", "()V")]);

        let mut summary = SummaryReport::new();
        for archive in ["a.jar", "b.jar"] {
            let result = comparer.compare(archive, &c1, &c2).expect("compare");
            summary.add(result.defects);
        }
        // same archive again collapses
        summary.add(comparer.compare("a.jar", &c1, &c2).expect("compare").defects);

        assert_eq!(summary.total_unique_defects(), 1);
        assert_eq!(summary.total_defects(), 2);
        let entries = summary.summarize();
        assert_eq!(
            entries[0].message,
            "[class.methods.missing2] Missing method in #2: bar()V"
        );
        assert_eq!(
            entries[0].locations,
            vec![
                Location::class("a.jar", "com/example/Api"),
                Location::class("b.jar", "com/example/Api"),
            ]
        );
    }
}

// ============================================================================
// Rendering-neutral diff values
// ============================================================================

mod diff_values {
    use super::*;

    #[test]
    fn generic_signature_kept_verbatim_in_json() {
        let mut c1 = class_with_methods(&[]);
        c1.signature = Some("<T:Ljava/lang/Object;>Ljava/lang/Object;".to_string());
        let mut c2 = c1.clone();
        c2.signature = Some("<T:Ljava/lang/Number;>Ljava/lang/Object;".to_string());

        let result = compare(&ClassComparer::new().expect("comparer"), &c1, &c2);
        let diff = result.diff.as_ref().expect("signature differs");
        let value = serde_json::to_value(diff).expect("serialize");
        let diffs = value["property_diffs"].as_array().expect("property diffs");
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0]["property"], "signature");
        assert_eq!(diffs[0]["value1"], "<T:Ljava/lang/Object;>Ljava/lang/Object;");
        assert_eq!(diffs[0]["value2"], "<T:Ljava/lang/Number;>Ljava/lang/Object;");
    }
}
