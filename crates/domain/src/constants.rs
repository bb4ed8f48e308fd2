//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use chrono_tz::Tz;

// Calendar-day accounting
pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const MAINTENANCE_SPLIT_CAP_MINUTES: f64 = 480.0;

// The pilot plant reports in Melbourne local time; day and hour attribution
// follow this zone unless the caller overrides it.
pub const DEFAULT_PLANT_TIMEZONE: Tz = chrono_tz::Australia::Melbourne;

// Segmentation result cache configuration
pub const DEFAULT_SEGMENT_CACHE_TTL_SECONDS: u64 = 3600;
pub const DEFAULT_SEGMENT_CACHE_MAX_CAPACITY: u64 = 64;

// Accepted naive timestamp layouts for the mixed-format sequence exports.
// RFC 3339 strings are tried first, then these in order; naive values are
// taken as UTC.
pub const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];
