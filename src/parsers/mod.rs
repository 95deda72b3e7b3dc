//! Structural class parsers.
//!
//! The engine never decodes class files itself. A [`ClassParser`] turns the
//! bytes of an archive entry into a [`ClassNode`](crate::model::ClassNode);
//! the shipped implementation reads the JSON form of that tree.
//!
//! ```
//! use abicmp::parsers::{ClassParser, JsonClassParser};
//!
//! let json = br#"{"name": "com/example/Foo", "access": 33}"#;
//! let node = JsonClassParser::new().parse_bytes("com/example/Foo.class.json", json).unwrap();
//! assert_eq!(node.name, "com/example/Foo");
//! ```

mod json;
mod traits;

pub use json::{JsonClassParser, CLASS_JSON_SUFFIX};
pub use traits::ClassParser;
