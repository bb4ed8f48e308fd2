//! Sequence duration segmentation domain

pub mod cache;
pub mod decode;
pub mod metrics;
pub mod ports;
pub mod segmenter;
pub mod service;

pub use cache::{SegmentationCache, SegmentationKey};
pub use decode::{decode_records, DecodedSequence};
pub use ports::{SequenceRepository, StateMappingRepository};
pub use segmenter::Segmenter;
pub use service::SequenceAnalyticsService;
