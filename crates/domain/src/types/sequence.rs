//! Sequence event stream types
//!
//! Vocabulary for the state-sequence log: raw CSV rows, decoded events, the
//! state reference table, and the day-bounded segments the segmenter
//! produces.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PLANT_TIMEZONE;
use crate::impl_domain_token_conversions;

/// One undecoded row of the sequence export
///
/// Column names follow the CSV contract of the loader collaborator;
/// timestamps arrive in mixed formats and codes may be quoted numerics, so
/// both stay as strings until [`decoded`](crate::types::sequence::SequenceEvent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSequenceRecord {
    /// Raw timestamp text (mixed formats, naive values taken as UTC)
    pub timestamp: String,
    /// Raw state code text (numeric, possibly quoted)
    pub code: String,
    /// Free-text description from the source system
    pub message: String,
}

/// One decoded, order-bearing state-change event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceEvent {
    /// Absolute point in time of the state change
    pub timestamp: DateTime<Utc>,
    /// Source system's numeric state identifier
    pub code: i64,
    /// Free-text description (carried through, unused by segmentation)
    pub message: String,
}

/// One row of the `Sequence States` reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMappingRecord {
    /// Numeric key matching [`SequenceEvent::code`]
    #[serde(rename = "State ID")]
    pub state_id: i64,
    /// Human state category, e.g. "Water Production"
    #[serde(rename = "State Type")]
    pub state_type: String,
    /// Sequence display name (loader contract only; unused by the core)
    #[serde(rename = "Sequence Name")]
    pub sequence_name: String,
}

/// The loaded state reference table: `code -> State Type`
///
/// `version` identifies the mapping revision and participates in the
/// segmentation cache key, so a reloaded table never serves stale results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMapping {
    /// Revision of the reference table this mapping was built from
    pub version: u64,
    by_code: BTreeMap<i64, String>,
}

impl StateMapping {
    /// Build a mapping from reference-table records
    pub fn from_records(version: u64, records: &[StateMappingRecord]) -> Self {
        let by_code =
            records.iter().map(|r| (r.state_id, r.state_type.clone())).collect::<BTreeMap<_, _>>();
        Self { version, by_code }
    }

    /// Look up the `State Type` for a state code
    pub fn state_type(&self, code: i64) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    /// Number of mapped state codes
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the reference table is empty
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Coarse state bucket derived from the raw `State Type`
///
/// Closed five-value set; `State Type` values outside the fixed dictionary
/// are dropped from category-bearing output rather than bucketed to an
/// "Other" value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Active water production
    Production,
    /// Cleaning and disinfection work
    Maintenance,
    /// Integrity and self tests
    Testing,
    /// System management and housekeeping
    System,
    /// Factory / commissioning states
    Manufacturing,
}

impl Category {
    /// Translate a raw `State Type` through the fixed category dictionary
    ///
    /// Returns `None` for values outside the dictionary; callers drop those
    /// rows (and count them) before duration computation.
    pub fn from_state_type(state_type: &str) -> Option<Self> {
        match state_type {
            "Water Production" => Some(Self::Production),
            "Cleaning & Disinfection" => Some(Self::Maintenance),
            "Testing" | "In-Field Self Test" => Some(Self::Testing),
            "System Management" => Some(Self::System),
            "Manufacturing" => Some(Self::Manufacturing),
            _ => None,
        }
    }

    /// All five categories, in their canonical order
    pub fn all() -> [Self; 5] {
        [Self::Production, Self::Maintenance, Self::Testing, Self::System, Self::Manufacturing]
    }

    /// Whether clean-split overflow handling treats this category as
    /// housekeeping (duplicate suppression and the 8-hour day-portion cap)
    pub fn is_housekeeping(self) -> bool {
        matches!(self, Self::Maintenance | Self::System)
    }
}

impl_domain_token_conversions!(Category {
    Production => "production",
    Maintenance => "maintenance",
    Testing => "testing",
    System => "system",
    Manufacturing => "manufacturing",
});

/// Policy for events and days whose attributed duration would overflow a
/// calendar day
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Exclude any calendar day whose attributed total exceeds 24 hours
    Hide,
    /// Split across days, suppress duplicate housekeeping states, cap
    /// housekeeping day-portions at 8 hours, and drop days that still
    /// overflow
    CleanSplit,
    /// Split across days chronologically with no further validation
    RawSplit,
    /// Keep raw durations even when a day's total exceeds 24 hours
    ShowAll,
}

impl_domain_token_conversions!(OverflowPolicy {
    Hide => "hide",
    CleanSplit => "clean_split",
    RawSplit => "raw_split",
    ShowAll => "show_all",
});

/// One day-bounded, category-labelled duration segment
///
/// Field order is the tabular output contract consumed by the presentation
/// collaborator: `timestamp`, `category`, `date`, `hour`,
/// `duration_minutes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSegment {
    /// Original (or policy-adjusted) start time of the segment
    pub timestamp: DateTime<Utc>,
    /// Coarse state bucket
    pub category: Category,
    /// Calendar day (plant-local) this segment is attributed to
    pub date: NaiveDate,
    /// Plant-local hour of the originating event's start
    pub hour: u32,
    /// Minutes attributed to this (event, date) pair
    pub duration_minutes: f64,
}

/// Caller-supplied segmentation parameters
///
/// Replaces the dashboard's session-level toggles (policy radio, category
/// visibility checkbox, date selector) with explicit arguments threaded into
/// every call; the core holds no process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentationRequest {
    /// Day-overflow resolution policy
    pub policy: OverflowPolicy,
    /// Categories retained before duration computation
    pub include_categories: BTreeSet<Category>,
    /// Timezone for calendar-day and hour attribution
    pub timezone: Tz,
    /// Optional inclusive plant-local date range filter
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl SegmentationRequest {
    /// Request with every category visible and the default plant timezone
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            policy,
            include_categories: Category::all().into_iter().collect(),
            timezone: DEFAULT_PLANT_TIMEZONE,
            date_range: None,
        }
    }

    /// Apply the dashboard's "show manufacturing states" toggle
    ///
    /// When hidden, Manufacturing and Testing rows are removed before
    /// durations are computed, so their time is absorbed by neighbouring
    /// retained events.
    pub fn show_manufacturing(mut self, show: bool) -> Self {
        if show {
            self.include_categories.insert(Category::Manufacturing);
            self.include_categories.insert(Category::Testing);
        } else {
            self.include_categories.remove(&Category::Manufacturing);
            self.include_categories.remove(&Category::Testing);
        }
        self
    }

    /// Restrict to an explicit category set
    pub fn with_categories(mut self, categories: BTreeSet<Category>) -> Self {
        self.include_categories = categories;
        self
    }

    /// Override the attribution timezone
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Restrict to an inclusive plant-local date range
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }
}

/// Segmentation output plus input-quality diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationOutcome {
    /// Day-bounded segments in chronological order
    pub segments: Vec<StateSegment>,
    /// Rows dropped during decoding (unparseable timestamp or code)
    pub dropped_rows: usize,
    /// Rows dropped because their `State Type` is outside the category
    /// dictionary (or their code is absent from the reference table)
    pub unmapped_rows: usize,
}

impl SegmentationOutcome {
    /// Whether segmentation produced no rows ("no data for period")
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
