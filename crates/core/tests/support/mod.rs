//! Shared test helpers for `brolga-core` integration tests.
//!
//! These helpers provide reusable fixtures and lightweight mocks so that
//! the sequence analytics tests can focus on behaviour instead of
//! boilerplate.

pub mod repositories;

use brolga_domain::{RawSequenceRecord, StateMapping, StateMappingRecord};

/// Initialise a test-writer subscriber so `RUST_LOG` surfaces core tracing
/// output during test runs. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// State codes used by the fixtures, matching the pilot's sequence export
pub const PRODUCTION_CODE: i64 = 2002;
pub const CLEANING_CODE: i64 = 2031;
pub const SYSTEM_CODE: i64 = 2021;
pub const SELF_TEST_CODE: i64 = 2022;
pub const MANUFACTURING_CODE: i64 = 2090;

/// Reference table covering every fixture code
pub fn sample_mapping() -> StateMapping {
    let records = vec![
        mapping_record(PRODUCTION_CODE, "Water Production", "PRODUCTION"),
        mapping_record(CLEANING_CODE, "Cleaning & Disinfection", "MEMBRANE_AIRSCOUR"),
        mapping_record(SYSTEM_CODE, "System Management", "WAIT"),
        mapping_record(SELF_TEST_CODE, "In-Field Self Test", "MEMBRANE_DIT"),
        mapping_record(MANUFACTURING_CODE, "Manufacturing", "FACTORY_TEST"),
    ];
    StateMapping::from_records(1, &records)
}

/// Convenience constructor for one reference-table row
pub fn mapping_record(state_id: i64, state_type: &str, sequence_name: &str) -> StateMappingRecord {
    StateMappingRecord {
        state_id,
        state_type: state_type.to_string(),
        sequence_name: sequence_name.to_string(),
    }
}

/// Convenience constructor for one raw CSV row
pub fn raw_record(timestamp: &str, code: i64) -> RawSequenceRecord {
    RawSequenceRecord {
        timestamp: timestamp.to_string(),
        code: code.to_string(),
        message: "Sequence state change".to_string(),
    }
}
