//! Segmenter and cache configuration
//!
//! Defaults come from [`crate::constants`]; deployments can override the
//! cache tuning and plant timezone through `BROLGA_*` environment variables.

use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;

use crate::constants::{
    DEFAULT_PLANT_TIMEZONE, DEFAULT_SEGMENT_CACHE_MAX_CAPACITY, DEFAULT_SEGMENT_CACHE_TTL_SECONDS,
};

/// Configuration for the sequence duration segmenter and its result cache
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Timezone used for calendar-day and hour attribution
    pub timezone: Tz,

    /// Time-to-live for cached segmentation results
    pub cache_ttl: Duration,

    /// Maximum number of cached segmentation results
    pub cache_max_capacity: u64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            timezone: std::env::var("BROLGA_PLANT_TIMEZONE")
                .ok()
                .and_then(|s| Tz::from_str(&s).ok())
                .unwrap_or(DEFAULT_PLANT_TIMEZONE),
            cache_ttl: Duration::from_secs(
                std::env::var("BROLGA_SEGMENT_CACHE_TTL_SECONDS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_SEGMENT_CACHE_TTL_SECONDS),
            ),
            cache_max_capacity: std::env::var("BROLGA_SEGMENT_CACHE_MAX_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SEGMENT_CACHE_MAX_CAPACITY),
        }
    }
}

impl SegmenterConfig {
    /// Create config with a custom cache TTL (useful for testing)
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { cache_ttl: ttl, ..Self::default() }
    }

    /// Create config with a custom attribution timezone
    pub fn with_timezone(timezone: Tz) -> Self {
        Self { timezone, ..Self::default() }
    }
}
