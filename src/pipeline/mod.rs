//! Pipeline orchestration for archive comparisons.
//!
//! An archive-pair job reads two [`Archive`]s, matches their class entries by
//! name and runs the class comparer on every pair; a [`BatchRunner`] discovers
//! archive pairs in two directory trees and runs one job per pair.

mod archive;
mod batch;
mod compare;
mod output;

pub use archive::{Archive, DirArchive};
pub use batch::{BatchOutcome, BatchRunner, JobOutcome, ARCHIVE_SUFFIX};
pub use compare::{ArchiveComparer, ArchiveReport, EntryFailure};
pub use output::{write_file, write_output, OutputTarget};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no differences detected
    pub const SUCCESS: i32 = 0;
    /// Differences were detected
    pub const DIFFERENCES_FOUND: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::DIFFERENCES_FOUND, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
