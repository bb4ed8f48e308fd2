//! Mock repository implementations for testing
//!
//! Provides in-memory mocks for the sequence ports, enabling deterministic
//! tests without the CSV-loading collaborator.

use std::sync::Mutex;

use brolga_core::{SequenceRepository, StateMappingRepository};
use brolga_domain::{RawSequenceRecord, Result as DomainResult, StateMapping};
use chrono::NaiveDate;

/// In-memory mock for `SequenceRepository`.
///
/// Serves a fixed set of raw rows and counts fetches so tests can assert
/// how often the port is exercised.
pub struct MockSequenceRepository {
    records: Vec<RawSequenceRecord>,
    fetch_count: Mutex<usize>,
}

impl MockSequenceRepository {
    /// Create a new mock seeded with the provided rows.
    pub fn new(records: Vec<RawSequenceRecord>) -> Self {
        Self { records, fetch_count: Mutex::new(0) }
    }

    /// Number of `fetch_records` calls observed so far.
    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }
}

impl SequenceRepository for MockSequenceRepository {
    fn fetch_records(
        &self,
        _range: Option<(NaiveDate, NaiveDate)>,
    ) -> DomainResult<Vec<RawSequenceRecord>> {
        *self.fetch_count.lock().unwrap() += 1;
        // Range pre-filtering is optional for implementations; the segmenter
        // filters again, so the mock returns everything.
        Ok(self.records.clone())
    }
}

/// In-memory mock for `StateMappingRepository`.
pub struct MockStateMappingRepository {
    mapping: StateMapping,
}

impl MockStateMappingRepository {
    /// Create a new mock serving the provided mapping.
    pub fn new(mapping: StateMapping) -> Self {
        Self { mapping }
    }
}

impl StateMappingRepository for MockStateMappingRepository {
    fn fetch_mapping(&self) -> DomainResult<StateMapping> {
        Ok(self.mapping.clone())
    }
}
