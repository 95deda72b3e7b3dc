//! Defect classification and aggregation.
//!
//! Checkers classify each finding as a [`DefectInfo`]: a [`DefectType`] plus
//! the attribute values that identify the finding independently of where it
//! was seen. The same info observed in many classes is clustered by
//! [`SummaryReport`] into one entry with a sorted [`Location`] list.

mod info;
mod location;
mod summary;

pub use info::{AttributeKind, DefectInfo, DefectType};
pub use location::Location;
pub use summary::{Defect, DefectReport, FailedJob, SummaryEntry, SummaryReport};
