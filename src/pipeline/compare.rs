//! Archive-pair comparison job.

use super::archive::Archive;
use crate::defects::{AttributeKind, DefectReport, DefectType, Location};
use crate::diff::{reconcile, ClassComparer, ContainerDiff};
use crate::error::Result;
use crate::model::{flags, ClassNode};
use crate::parsers::ClassParser;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

/// An entry that could not be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub entry: String,
    pub reason: String,
}

/// Result of comparing two archives.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    pub header: String,
    pub header1: String,
    pub header2: String,
    pub archive1: String,
    pub archive2: String,
    /// Sorted by class name
    pub class_diffs: Vec<ContainerDiff>,
    /// `"<entry> <class flags>"` lines for entries only present in archive 2
    pub missing_in_1: Vec<String>,
    /// `"<entry> <class flags>"` lines for entries only present in archive 1
    pub missing_in_2: Vec<String>,
    pub failures: Vec<EntryFailure>,
    #[serde(skip)]
    pub defects: DefectReport,
    /// Classes with differences plus missing classes
    pub total_diffs: usize,
}

impl ArchiveReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_diffs.is_empty()
            && self.missing_in_1.is_empty()
            && self.missing_in_2.is_empty()
            && self.failures.is_empty()
    }
}

enum EntryOutcome {
    Same,
    Skipped,
    Compared(Option<ContainerDiff>, DefectReport),
    Failed(EntryFailure),
}

/// Compares the class entries of two archives.
#[derive(Clone)]
pub struct ArchiveComparer {
    comparer: Arc<ClassComparer>,
    parser: Arc<dyn ClassParser>,
    header1: String,
    header2: String,
    missing1: DefectType,
    missing2: DefectType,
    unreadable: DefectType,
}

impl ArchiveComparer {
    pub fn new(comparer: Arc<ClassComparer>, parser: Arc<dyn ClassParser>) -> Self {
        Self {
            comparer,
            parser,
            header1: "#1".to_string(),
            header2: "#2".to_string(),
            missing1: DefectType::new(
                "jar.classes.missing1",
                "Missing class in #1: [CLASS]",
                &[AttributeKind::Class],
            ),
            missing2: DefectType::new(
                "jar.classes.missing2",
                "Missing class in #2: [CLASS]",
                &[AttributeKind::Class],
            ),
            unreadable: DefectType::new(
                "jar.entry.unreadable",
                "Entry could not be compared: [VALUE1]",
                &[AttributeKind::Value1],
            ),
        }
    }

    /// Column titles for the two sides.
    #[must_use]
    pub fn with_headers(mut self, header1: impl Into<String>, header2: impl Into<String>) -> Self {
        self.header1 = header1.into();
        self.header2 = header2.into();
        self
    }

    #[must_use]
    pub fn headers(&self) -> (&str, &str) {
        (&self.header1, &self.header2)
    }

    /// Compare every class entry of two archives.
    ///
    /// Entries that fail to read or parse are listed in the report's
    /// failures. An error is returned only when an archive cannot be listed
    /// or the comparison context is misconfigured.
    pub fn compare(
        &self,
        header: &str,
        archive1: &dyn Archive,
        archive2: &dyn Archive,
    ) -> Result<ArchiveReport> {
        tracing::info!(archive1 = archive1.name(), archive2 = archive2.name(), "Comparing archives");

        let names1 = self.class_entries(archive1)?;
        let names2 = self.class_entries(archive2)?;
        let archive_name = archive1.name();

        let mut report = ArchiveReport {
            header: header.to_string(),
            header1: self.header1.clone(),
            header2: self.header2.clone(),
            archive1: archive1.name().to_string(),
            archive2: archive2.name().to_string(),
            class_diffs: Vec::new(),
            missing_in_1: Vec::new(),
            missing_in_2: Vec::new(),
            failures: Vec::new(),
            defects: DefectReport::new(),
            total_diffs: 0,
        };

        let (only1, only2): (Vec<String>, Vec<String>) = match reconcile(&names1, &names2) {
            None => (Vec::new(), Vec::new()),
            Some(diff) => (
                diff.only_left().map(str::to_string).collect(),
                diff.only_right().map(str::to_string).collect(),
            ),
        };
        let set2: BTreeSet<&str> = names2.iter().map(String::as_str).collect();
        let common: Vec<&String> = names1.iter().filter(|n| set2.contains(n.as_str())).collect();

        let outcomes: Vec<(String, Result<EntryOutcome>)> = common
            .par_iter()
            .map(|entry| {
                let outcome = self.compare_entry(archive_name, entry, archive1, archive2);
                ((*entry).clone(), outcome)
            })
            .collect();

        for (entry, outcome) in outcomes {
            match outcome? {
                EntryOutcome::Same => tracing::debug!(entry = %entry, "Identical entry"),
                EntryOutcome::Skipped => tracing::debug!(entry = %entry, "Skipping ignored class"),
                EntryOutcome::Compared(diff, defects) => {
                    report.defects.extend(defects);
                    if let Some(diff) = diff {
                        report.total_diffs += 1;
                        report.class_diffs.push(diff);
                    }
                }
                EntryOutcome::Failed(failure) => self.record_failure(archive_name, failure, &mut report),
            }
        }

        for entry in &only1 {
            self.record_missing(archive_name, archive1, entry, false, &mut report);
        }
        for entry in &only2 {
            self.record_missing(archive_name, archive2, entry, true, &mut report);
        }

        report.class_diffs.sort_by(|a, b| a.name.cmp(&b.name));
        report.missing_in_1.sort();
        report.missing_in_2.sort();
        report.failures.sort_by(|a, b| a.entry.cmp(&b.entry));

        tracing::info!(
            archive = archive_name,
            total_diffs = report.total_diffs,
            failures = report.failures.len(),
            "Archive comparison complete"
        );
        Ok(report)
    }

    fn class_entries(&self, archive: &dyn Archive) -> Result<Vec<String>> {
        Ok(archive
            .entry_names()?
            .into_iter()
            .filter(|name| self.parser.accepts(name))
            .collect())
    }

    fn load(&self, archive: &dyn Archive, entry: &str) -> std::result::Result<Vec<u8>, EntryFailure> {
        archive.read_entry(entry).map_err(|e| EntryFailure {
            entry: entry.to_string(),
            reason: e.cause(),
        })
    }

    fn parse(&self, entry: &str, bytes: &[u8]) -> std::result::Result<ClassNode, EntryFailure> {
        self.parser.parse_bytes(entry, bytes).map_err(|e| EntryFailure {
            entry: entry.to_string(),
            reason: e.cause(),
        })
    }

    fn compare_entry(
        &self,
        archive_name: &str,
        entry: &str,
        archive1: &dyn Archive,
        archive2: &dyn Archive,
    ) -> Result<EntryOutcome> {
        let loaded = self
            .load(archive1, entry)
            .and_then(|b1| self.load(archive2, entry).map(|b2| (b1, b2)));
        let (bytes1, bytes2) = match loaded {
            Ok(pair) => pair,
            Err(failure) => return Ok(EntryOutcome::Failed(failure)),
        };
        if xxh3_64(&bytes1) == xxh3_64(&bytes2) && bytes1 == bytes2 {
            return Ok(EntryOutcome::Same);
        }

        let parsed = self
            .parse(entry, &bytes1)
            .and_then(|c1| self.parse(entry, &bytes2).map(|c2| (c1, c2)));
        let (class1, class2) = match parsed {
            Ok(pair) => pair,
            Err(failure) => return Ok(EntryOutcome::Failed(failure)),
        };

        let policies = self.comparer.policies();
        if policies.is_ignored_class(&class1) && policies.is_ignored_class(&class2) {
            return Ok(EntryOutcome::Skipped);
        }
        let result = self.comparer.compare(archive_name, &class1, &class2)?;
        Ok(EntryOutcome::Compared(result.diff, result.defects))
    }

    fn record_failure(&self, archive_name: &str, failure: EntryFailure, report: &mut ArchiveReport) {
        tracing::warn!(entry = %failure.entry, "Entry failed: {}", failure.reason);
        match self
            .unreadable
            .info([(AttributeKind::Value1, failure.reason.clone())])
        {
            Ok(info) => report
                .defects
                .report(info, Location::class(archive_name, &failure.entry)),
            Err(e) => tracing::error!("{e}"),
        }
        report.failures.push(failure);
    }

    /// `present_in_2` selects which side holds the entry.
    fn record_missing(
        &self,
        archive_name: &str,
        archive: &dyn Archive,
        entry: &str,
        present_in_2: bool,
        report: &mut ArchiveReport,
    ) {
        let class = match self.load(archive, entry).and_then(|b| self.parse(entry, &b)) {
            Ok(class) => class,
            Err(failure) => {
                self.record_failure(archive_name, failure, report);
                return;
            }
        };
        if self.comparer.policies().is_ignored_class(&class) {
            tracing::debug!(entry, "Skipping ignored missing class");
            return;
        }

        let line = format!("{entry} {}", flags::class_flags(class.access));
        let (defect_type, list) = if present_in_2 {
            (&self.missing1, &mut report.missing_in_1)
        } else {
            (&self.missing2, &mut report.missing_in_2)
        };
        list.push(line);
        report.total_diffs += 1;
        match defect_type.info([(AttributeKind::Class, class.name.clone())]) {
            Ok(info) => report.defects.report(info, Location::archive(archive_name)),
            Err(e) => tracing::error!("{e}"),
        }
    }
}
