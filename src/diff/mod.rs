//! Structural diff engine for class files.
//!
//! # Architecture
//!
//! - [`reconcile`]: sorted two-list merge used for every list-shaped comparison
//! - [`diff_annotations`]: annotation-specific reconciliation with deep value
//!   comparison of matched descriptors
//! - [`checkers`]: the closed set of property, annotation and list checkers,
//!   selected through a [`CheckerConfiguration`]
//! - [`ExceptionPolicies`]: independently toggleable suppression heuristics
//! - [`ClassComparer`]: runs the checkers over a class pair and its matched
//!   members, producing a [`ContainerDiff`] and the classified defects
//!
//! # Example
//!
//! ```
//! use abicmp::diff::ClassComparer;
//! use abicmp::model::{ClassNode, MethodNode, flags};
//!
//! let comparer = ClassComparer::new().unwrap();
//! let mut old = ClassNode::new(flags::ACC_PUBLIC, "com/example/Api");
//! old.methods.push(MethodNode::new(flags::ACC_PUBLIC, "run", "()V"));
//! let new = ClassNode::new(flags::ACC_PUBLIC, "com/example/Api");
//!
//! let result = comparer.compare("api.jar", &old, &new).unwrap();
//! let diff = result.diff.unwrap();
//! assert!(diff.structure("class.methods").is_some());
//! ```

mod annotations;
pub mod checkers;
mod engine;
mod list;
mod policy;
mod result;

pub use annotations::{diff_annotations, DEFAULT_IGNORED_ANNOTATIONS};
pub use checkers::{CheckerConfiguration, CheckerSet};
pub use engine::{ClassComparer, ClassComparerBuilder, ClassComparison};
pub use list::{reconcile, ListDiff, MISSING};
pub use policy::{equally_invisible, is_sam_adapter_name, ExceptionPolicies, NULLABILITY_ANNOTATIONS};
pub use result::{ContainerDiff, MemberDiff, NamedListDiff, ParameterAnnotationDiff, PropertyDiff};
