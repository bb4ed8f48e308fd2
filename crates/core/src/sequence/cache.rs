//! Segmentation result caching with moka
//!
//! The dashboard re-renders on every control change, so identical
//! segmentation requests repeat constantly. This read-through cache keys on
//! the event stream's content fingerprint, the mapping revision, and the
//! full request, and is purely advisory - correctness never depends on a
//! hit, and errors are never cached.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use ahash::AHasher;
use brolga_domain::{
    Result, SegmentationOutcome, SegmentationRequest, SegmenterConfig, SequenceEvent,
    StateMapping,
};
use moka::sync::Cache;
use tracing::debug;

/// Cache key: input identity plus the full segmentation request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentationKey {
    stream_fingerprint: u64,
    mapping_version: u64,
    request: SegmentationRequest,
}

impl SegmentationKey {
    /// Build a key from the decoded stream, mapping, and request
    pub fn new(
        events: &[SequenceEvent],
        mapping: &StateMapping,
        request: &SegmentationRequest,
    ) -> Self {
        let mut hasher = AHasher::default();
        events.len().hash(&mut hasher);
        for event in events {
            event.timestamp.timestamp_millis().hash(&mut hasher);
            event.code.hash(&mut hasher);
            event.message.hash(&mut hasher);
        }

        Self {
            stream_fingerprint: hasher.finish(),
            mapping_version: mapping.version,
            request: request.clone(),
        }
    }
}

/// In-memory read-through cache for segmentation outcomes
pub struct SegmentationCache {
    results: Cache<SegmentationKey, Arc<SegmentationOutcome>>,
}

impl SegmentationCache {
    /// Create a cache with the configured TTL and capacity
    pub fn new(config: &SegmenterConfig) -> Self {
        let results = Cache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.cache_max_capacity)
            .build();
        Self { results }
    }

    /// Look up a cached outcome
    pub fn get(&self, key: &SegmentationKey) -> Option<Arc<SegmentationOutcome>> {
        self.results.get(key)
    }

    /// Fetch from cache or compute and insert
    ///
    /// Errors from `compute` propagate to the caller and are never cached,
    /// so a transient failure cannot shadow later successful runs.
    pub fn get_or_compute<F>(
        &self,
        key: SegmentationKey,
        compute: F,
    ) -> Result<Arc<SegmentationOutcome>>
    where
        F: FnOnce() -> Result<SegmentationOutcome>,
    {
        if let Some(hit) = self.results.get(&key) {
            debug!("segmentation cache hit");
            return Ok(hit);
        }

        let outcome = Arc::new(compute()?);
        self.results.insert(key, Arc::clone(&outcome));
        Ok(outcome)
    }

    /// Drop every cached outcome (e.g. after a data reload)
    pub fn clear(&self) {
        self.results.invalidate_all();
    }

    /// Number of cached outcomes
    pub fn entry_count(&self) -> u64 {
        self.results.run_pending_tasks();
        self.results.entry_count()
    }
}
