//! Sequence analytics service - core business logic
//!
//! The single reusable entry point all presentation call sites share:
//! fetches raw rows and the state mapping through the ports, decodes, and
//! segments under the caller's policy, optionally through the advisory
//! result cache.

use std::sync::Arc;

use brolga_domain::{
    BrolgaError, OverflowPolicy, Result, SegmentationOutcome, SegmentationRequest,
    SegmenterConfig,
};
use tracing::warn;

use super::cache::{SegmentationCache, SegmentationKey};
use super::decode::decode_records;
use super::ports::{SequenceRepository, StateMappingRepository};
use super::segmenter::Segmenter;

/// Sequence analytics service
pub struct SequenceAnalyticsService {
    sequences: Arc<dyn SequenceRepository>,
    mappings: Arc<dyn StateMappingRepository>,
    segmenter: Segmenter,
    cache: Option<SegmentationCache>,
    config: SegmenterConfig,
}

impl SequenceAnalyticsService {
    /// Create a new service without result caching
    pub fn new(
        sequences: Arc<dyn SequenceRepository>,
        mappings: Arc<dyn StateMappingRepository>,
        config: SegmenterConfig,
    ) -> Self {
        Self { sequences, mappings, segmenter: Segmenter::new(), cache: None, config }
    }

    /// Enable the advisory segmentation result cache
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(SegmentationCache::new(&self.config));
        self
    }

    /// A request pre-populated with the configured plant timezone
    pub fn base_request(&self, policy: OverflowPolicy) -> SegmentationRequest {
        SegmentationRequest::new(policy).with_timezone(self.config.timezone)
    }

    /// Fetch, decode, and segment the sequence stream for a request
    ///
    /// Decoding drops malformed rows and reports them in the outcome's
    /// `dropped_rows`; an empty stream yields an empty outcome, not an
    /// error. Port failures propagate unchanged.
    pub fn analyze(&self, request: &SegmentationRequest) -> Result<Arc<SegmentationOutcome>> {
        let records = self.sequences.fetch_records(request.date_range)?;
        let mapping = self.mappings.fetch_mapping()?;

        let decoded = decode_records(&records);
        if decoded.dropped_rows > 0 {
            warn!(dropped_rows = decoded.dropped_rows, "malformed sequence rows were dropped");
        }

        let compute = || {
            let mut outcome = self.segmenter.segment(&decoded.events, &mapping, request)?;
            outcome.dropped_rows = decoded.dropped_rows;
            Ok(outcome)
        };

        match &self.cache {
            Some(cache) => {
                let key = SegmentationKey::new(&decoded.events, &mapping, request);
                cache.get_or_compute(key, compute)
            }
            None => compute().map(Arc::new),
        }
    }

    /// Segment under a policy supplied as a UI token
    ///
    /// Accepts the selector labels in any casing, with spaces or
    /// underscores ("Clean Split", "clean_split"). Rejects unknown tokens
    /// at the boundary with `InvalidInput`; there is no silent fallback
    /// policy.
    pub fn analyze_with_policy_token(
        &self,
        token: &str,
        show_manufacturing: bool,
    ) -> Result<Arc<SegmentationOutcome>> {
        let policy = token
            .trim()
            .replace(' ', "_")
            .parse::<OverflowPolicy>()
            .map_err(BrolgaError::InvalidInput)?;
        let request = self.base_request(policy).show_manufacturing(show_manufacturing);
        self.analyze(&request)
    }
}
