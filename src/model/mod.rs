//! Data model for structural comparison.
//!
//! Two layers live here:
//!
//! - The **source-node tree** ([`ClassNode`], [`MethodNode`], [`FieldNode`],
//!   [`InnerClassNode`], [`AnnotationNode`]) handed over by a
//!   [`ClassParser`](crate::parsers::ClassParser).
//! - The **property model**: explicit [`PropertyRegistry`] objects built once
//!   per entity kind, and the [`Entity`] values they extract from nodes.
//!
//! ```
//! use abicmp::model::{ClassNode, Schema, flags};
//!
//! let schema = Schema::standard().unwrap();
//! let node = ClassNode::new(flags::ACC_PUBLIC, "com/example/Foo");
//! let entity = schema.classes.extract(node.name.clone(), &node);
//! assert_eq!(entity.id, "com/example/Foo");
//! ```

mod annotation;
pub mod flags;
mod node;
mod property;
mod schema;

pub use annotation::{to_entries, value_string, AnnotationEntry};
pub use node::{
    parameter_count, AnnotationNode, AnnotationValue, ClassNode, FieldNode, InnerClassNode,
    MethodNode,
};
pub use property::{
    default_render, AnnotationProperty, Entity, EntityKind, ParameterAnnotationProperty,
    Property, PropertyHandle, PropertyRegistry, PropertyRegistryBuilder, PropertyValue,
};
pub use schema::Schema;
