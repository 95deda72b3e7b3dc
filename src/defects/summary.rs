//! Defect collection and clustering.

use super::info::DefectInfo;
use super::location::Location;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A defect observed at one location.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Defect {
    pub info: DefectInfo,
    pub location: Location,
}

/// Defects produced by one comparison job, in emission order.
///
/// Owned by the job that fills it and handed to the summary afterwards, so
/// parallel jobs never share one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DefectReport {
    defects: Vec<Defect>,
}

impl DefectReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, info: DefectInfo, location: Location) {
        self.defects.push(Defect { info, location });
    }

    pub fn extend(&mut self, other: Self) {
        self.defects.extend(other.defects);
    }

    #[must_use]
    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defects.is_empty()
    }
}

/// A job that could not be compared at all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FailedJob {
    pub name: String,
    pub reason: String,
}

/// One clustered entry of a summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    pub message: String,
    pub info: DefectInfo,
    pub locations: Vec<Location>,
}

/// Defects clustered by [`DefectInfo`] across every job of a run.
#[derive(Debug, Clone, Default)]
pub struct SummaryReport {
    defects_by_info: BTreeMap<DefectInfo, BTreeSet<Location>>,
    failed_jobs: Vec<FailedJob>,
}

impl SummaryReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation; repeated `(info, location)` pairs collapse.
    pub fn record(&mut self, info: DefectInfo, location: Location) {
        self.defects_by_info.entry(info).or_default().insert(location);
    }

    /// Fold a job's defects into the summary.
    pub fn add(&mut self, report: DefectReport) {
        for defect in report.defects {
            self.record(defect.info, defect.location);
        }
    }

    pub fn add_failed_job(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.failed_jobs.push(FailedJob {
            name: name.into(),
            reason: reason.into(),
        });
        self.failed_jobs.sort();
    }

    #[must_use]
    pub fn failed_jobs(&self) -> &[FailedJob] {
        &self.failed_jobs
    }

    /// Clusters in canonical order, each with its sorted locations.
    #[must_use]
    pub fn summarize(&self) -> Vec<SummaryEntry> {
        self.defects_by_info
            .iter()
            .map(|(info, locations)| SummaryEntry {
                message: info.message(),
                info: info.clone(),
                locations: locations.iter().cloned().collect(),
            })
            .collect()
    }

    /// Number of distinct `(info, location)` observations.
    #[must_use]
    pub fn total_defects(&self) -> usize {
        self.defects_by_info.values().map(BTreeSet::len).sum()
    }

    /// Number of clusters.
    #[must_use]
    pub fn total_unique_defects(&self) -> usize {
        self.defects_by_info.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defects_by_info.is_empty() && self.failed_jobs.is_empty()
    }
}

impl Serialize for SummaryReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SummaryReport", 4)?;
        state.serialize_field("total_defects", &self.total_defects())?;
        state.serialize_field("total_unique_defects", &self.total_unique_defects())?;
        state.serialize_field("defects", &self.summarize())?;
        state.serialize_field("failed_jobs", &self.failed_jobs)?;
        state.end()
    }
}
