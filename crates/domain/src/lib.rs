//! # Brolga Domain
//!
//! Business domain types and models for the Brolga sequence analytics core.
//!
//! This crate contains:
//! - Domain data types (`SequenceEvent`, `StateSegment`, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and token-conversion macros
//!
//! ## Architecture
//! - No dependencies on other Brolga crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::SegmenterConfig;
pub use errors::{BrolgaError, Result};
pub use types::metrics::{CategoryStats, EfficiencyTrend, ProductionSummary};
pub use types::sequence::{
    Category, OverflowPolicy, RawSequenceRecord, SegmentationOutcome, SegmentationRequest,
    SequenceEvent, StateMapping, StateMappingRecord, StateSegment,
};
