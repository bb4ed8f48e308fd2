//! Port interfaces for the sequence-loading collaborators
//!
//! CSV ingestion lives outside the core; these traits are the seam. The
//! core is single-threaded and synchronous, so the ports are too.

use brolga_domain::{RawSequenceRecord, Result, StateMapping};
use chrono::NaiveDate;

/// Source of raw sequence rows (the combined `Sequences *.csv` exports)
pub trait SequenceRepository: Send + Sync {
    /// Fetch raw rows, optionally restricted to an inclusive plant-local
    /// date range
    ///
    /// Implementations may pre-filter by range or ignore it and return the
    /// full stream; the segmenter applies the range filter again either way.
    fn fetch_records(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<RawSequenceRecord>>;
}

/// Source of the `Sequence States` reference table
pub trait StateMappingRepository: Send + Sync {
    /// Fetch the current state mapping, including its revision number
    fn fetch_mapping(&self) -> Result<StateMapping>;
}
