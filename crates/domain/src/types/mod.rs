//! Domain types and models

pub mod metrics;
pub mod sequence;

// Re-export the sequence vocabulary for convenience
pub use metrics::{CategoryStats, EfficiencyTrend, ProductionSummary};
pub use sequence::{
    Category, OverflowPolicy, RawSequenceRecord, SegmentationOutcome, SegmentationRequest,
    SequenceEvent, StateMapping, StateMappingRecord, StateSegment,
};
