//! The standard property registries for classes, methods and fields.

use super::annotation::{to_entries, value_string, AnnotationEntry};
use super::flags;
use super::node::{AnnotationNode, AnnotationValue, ClassNode, FieldNode, MethodNode};
use super::property::{EntityKind, PropertyRegistry, PropertyValue};
use crate::error::Result;

/// One registry per entity kind, built once and shared by every comparison.
pub struct Schema {
    pub classes: PropertyRegistry<ClassNode>,
    pub methods: PropertyRegistry<MethodNode>,
    pub fields: PropertyRegistry<FieldNode>,
}

impl Schema {
    /// Registries with every standard property in report order.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            classes: class_registry()?,
            methods: method_registry()?,
            fields: field_registry()?,
        })
    }

    /// Every checker name derived from the registries, in registry order.
    #[must_use]
    pub fn property_checker_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_names(&self.classes, &mut names);
        collect_names(&self.methods, &mut names);
        collect_names(&self.fields, &mut names);
        names
    }
}

fn collect_names<S>(registry: &PropertyRegistry<S>, out: &mut Vec<String>) {
    let prefix = registry.kind().prefix();
    let names = registry
        .properties()
        .iter()
        .map(|p| p.name().to_string())
        .chain(registry.annotation_properties().iter().map(|p| p.name().to_string()))
        .chain(
            registry
                .parameter_annotation_properties()
                .iter()
                .map(|p| p.name().to_string()),
        );
    out.extend(names.map(|name| format!("{prefix}.{name}")));
}

fn access_render(render_flags: fn(u32) -> String) -> impl Fn(&PropertyValue) -> String {
    move |value| match value.as_int().and_then(|v| u32::try_from(v).ok()) {
        Some(bits) => format!("{bits:b} {}", render_flags(bits)),
        None => value.to_string(),
    }
}

fn str_value(s: &str) -> PropertyValue {
    PropertyValue::Str(s.to_string())
}

fn annotation_value(value: Option<&AnnotationValue>) -> PropertyValue {
    value.map_or(PropertyValue::Null, |v| PropertyValue::Str(value_string(v)))
}

fn parameter_entries(params: &[Vec<AnnotationNode>]) -> Vec<Vec<AnnotationEntry>> {
    params.iter().map(|p| to_entries(p)).collect()
}

fn class_registry() -> Result<PropertyRegistry<ClassNode>> {
    PropertyRegistry::builder(EntityKind::Class)
        .property("version", |c: &ClassNode| PropertyValue::Int(i64::from(c.version)))
        .property_with_render(
            "access",
            |c: &ClassNode| PropertyValue::Int(i64::from(c.access)),
            access_render(flags::class_flags),
        )
        .property("internalName", |c: &ClassNode| str_value(&c.name))
        .property("signature", |c: &ClassNode| {
            PropertyValue::opt_str(c.signature.as_deref())
        })
        .property("superClassInternalName", |c: &ClassNode| {
            PropertyValue::opt_str(c.super_name.as_deref())
        })
        .property("superInterfaces", |c: &ClassNode| {
            PropertyValue::sorted_strs(&c.interfaces)
        })
        .property("sourceFile", |c: &ClassNode| {
            PropertyValue::opt_str(c.source_file.as_deref())
        })
        .property("outerClass", |c: &ClassNode| {
            PropertyValue::opt_str(c.outer_class.as_deref())
        })
        .property("outerMethod", |c: &ClassNode| {
            PropertyValue::opt_str(c.outer_method.as_deref())
        })
        .property("outerMethodDesc", |c: &ClassNode| {
            PropertyValue::opt_str(c.outer_method_desc.as_deref())
        })
        .annotations("visibleAnnotations", |c: &ClassNode| {
            to_entries(&c.visible_annotations)
        })
        .annotations("invisibleAnnotations", |c: &ClassNode| {
            to_entries(&c.invisible_annotations)
        })
        .build()
}

fn method_registry() -> Result<PropertyRegistry<MethodNode>> {
    PropertyRegistry::builder(EntityKind::Method)
        .property_with_render(
            "access",
            |m: &MethodNode| PropertyValue::Int(i64::from(m.access)),
            access_render(flags::method_flags),
        )
        .property("methodName", |m: &MethodNode| str_value(&m.name))
        .property("desc", |m: &MethodNode| str_value(&m.desc))
        .property("signature", |m: &MethodNode| {
            PropertyValue::opt_str(m.signature.as_deref())
        })
        .property("exceptions", |m: &MethodNode| {
            PropertyValue::sorted_strs(&m.exceptions)
        })
        .property("annotationDefault", |m: &MethodNode| {
            annotation_value(m.annotation_default.as_ref())
        })
        .annotations("visibleAnnotations", |m: &MethodNode| {
            to_entries(&m.visible_annotations)
        })
        .annotations("invisibleAnnotations", |m: &MethodNode| {
            to_entries(&m.invisible_annotations)
        })
        .parameter_annotations("visibleParameterAnnotations", |m: &MethodNode| {
            parameter_entries(&m.visible_parameter_annotations)
        })
        .parameter_annotations("invisibleParameterAnnotations", |m: &MethodNode| {
            parameter_entries(&m.invisible_parameter_annotations)
        })
        .build()
}

fn field_registry() -> Result<PropertyRegistry<FieldNode>> {
    PropertyRegistry::builder(EntityKind::Field)
        .property_with_render(
            "access",
            |f: &FieldNode| PropertyValue::Int(i64::from(f.access)),
            access_render(flags::field_flags),
        )
        .property("fieldName", |f: &FieldNode| str_value(&f.name))
        .property("desc", |f: &FieldNode| str_value(&f.desc))
        .property("signature", |f: &FieldNode| {
            PropertyValue::opt_str(f.signature.as_deref())
        })
        .property("initialValue", |f: &FieldNode| annotation_value(f.value.as_ref()))
        .annotations("visibleAnnotations", |f: &FieldNode| {
            to_entries(&f.visible_annotations)
        })
        .annotations("invisibleAnnotations", |f: &FieldNode| {
            to_entries(&f.invisible_annotations)
        })
        .build()
}
