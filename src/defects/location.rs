//! Hierarchical defect locations.

use serde::Serialize;
use std::fmt;

/// Where a defect was observed.
///
/// Variant order is significant: locations sort by kind first, then archive,
/// class and member name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Location {
    Archive {
        archive: String,
    },
    Class {
        archive: String,
        class: String,
    },
    Method {
        archive: String,
        class: String,
        method: String,
    },
    Field {
        archive: String,
        class: String,
        field: String,
    },
}

impl Location {
    pub fn archive(archive: impl Into<String>) -> Self {
        Self::Archive {
            archive: archive.into(),
        }
    }

    pub fn class(archive: impl Into<String>, class: impl Into<String>) -> Self {
        Self::Class {
            archive: archive.into(),
            class: class.into(),
        }
    }

    /// Method location inside this class location; `None` unless `self` is a class.
    #[must_use]
    pub fn method(&self, method: impl Into<String>) -> Option<Self> {
        match self {
            Self::Class { archive, class } => Some(Self::Method {
                archive: archive.clone(),
                class: class.clone(),
                method: method.into(),
            }),
            _ => None,
        }
    }

    /// Field location inside this class location; `None` unless `self` is a class.
    #[must_use]
    pub fn field(&self, field: impl Into<String>) -> Option<Self> {
        match self {
            Self::Class { archive, class } => Some(Self::Field {
                archive: archive.clone(),
                class: class.clone(),
                field: field.into(),
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn archive_name(&self) -> &str {
        match self {
            Self::Archive { archive }
            | Self::Class { archive, .. }
            | Self::Method { archive, .. }
            | Self::Field { archive, .. } => archive,
        }
    }

    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Archive { .. } => None,
            Self::Class { class, .. } | Self::Method { class, .. } | Self::Field { class, .. } => {
                Some(class)
            }
        }
    }

    /// Human-readable address used in summary reports.
    #[must_use]
    pub fn report_string(&self) -> String {
        match self {
            Self::Archive { archive } => format!("Jar file {archive}"),
            Self::Class { archive, class } => format!("Class {class} in jar file {archive}"),
            Self::Method {
                archive,
                class,
                method,
            } => format!("Method {method} in class {class}, jar file {archive}"),
            Self::Field {
                archive,
                class,
                field,
            } => format!("Field {field} in class {class}, jar file {archive}"),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report_string())
    }
}
