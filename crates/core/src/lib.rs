//! # Brolga Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The sequence duration segmenter and its overflow policies
//! - Aggregation helpers over segmented sequences
//! - Port/adapter interfaces (traits) for the CSV-loading collaborator
//! - The advisory segmentation result cache
//!
//! ## Architecture Principles
//! - Only depends on `brolga-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod sequence;

// Re-export specific items to avoid ambiguity
pub use sequence::cache::{SegmentationCache, SegmentationKey};
pub use sequence::decode::{decode_records, DecodedSequence};
pub use sequence::metrics::{
    category_summary, daily_distribution, efficiency_trend, hourly_pattern, percent_change,
    production_summary, total_by_category, transition_counts,
};
pub use sequence::ports::{SequenceRepository, StateMappingRepository};
pub use sequence::segmenter::Segmenter;
pub use sequence::service::SequenceAnalyticsService;
