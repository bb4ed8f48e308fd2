//! Sequence duration segmenter
//!
//! Walks a chronologically sorted state-change stream, computes inter-event
//! durations, attributes each duration to a plant-local calendar day, and
//! resolves day overflow under the caller-selected policy.
//!
//! Duration semantics: each event's duration is the delta to the next
//! chronological event; the final event gets the stream-wide median so the
//! tail does not skew aggregates. Splitting is a fold over the sorted stream
//! with an explicit accumulator - a day's remaining capacity is 24 hours
//! minus whichever is larger, the minutes already attributed to the day or
//! the event's own clock position within it, which covers both overflow
//! triggers (midnight-crossing spans and accumulated day totals).

use std::collections::BTreeMap;

use brolga_domain::constants::{MAINTENANCE_SPLIT_CAP_MINUTES, MINUTES_PER_DAY};
use brolga_domain::{
    Category, OverflowPolicy, Result, SegmentationOutcome, SegmentationRequest, SequenceEvent,
    StateMapping, StateSegment,
};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use tracing::warn;

/// Policy-driven sequence duration segmenter
///
/// Stateless: every call derives its output purely from the supplied events,
/// mapping, and request, so re-running with identical input yields identical
/// output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Segmenter;

/// One categorised event with its computed duration and local-calendar
/// attribution, ready for policy resolution
#[derive(Debug, Clone)]
struct PreparedRow {
    timestamp: DateTime<Utc>,
    category: Category,
    date: NaiveDate,
    hour: u32,
    minute_of_day: f64,
    duration_minutes: f64,
}

/// Accumulator threaded through the split fold
#[derive(Debug, Clone, Copy)]
struct SplitAccumulator {
    current_date: NaiveDate,
    day_total: f64,
    last_category: Option<Category>,
}

impl Segmenter {
    /// Create a new segmenter
    pub fn new() -> Self {
        Self
    }

    /// Segment an event stream under the requested overflow policy
    ///
    /// Category mapping, the visibility filter, and the optional date-range
    /// filter all run before duration computation, so removed events'
    /// time is absorbed by their retained neighbours. An input that is empty
    /// (or empty after filtering) yields an empty outcome, not an error.
    pub fn segment(
        &self,
        events: &[SequenceEvent],
        mapping: &StateMapping,
        request: &SegmentationRequest,
    ) -> Result<SegmentationOutcome> {
        let mut unmapped_rows = 0usize;
        let mut retained: Vec<(SequenceEvent, Category)> = Vec::with_capacity(events.len());

        for event in events {
            let Some(category) =
                mapping.state_type(event.code).and_then(Category::from_state_type)
            else {
                unmapped_rows += 1;
                continue;
            };
            if !request.include_categories.contains(&category) {
                continue;
            }
            retained.push((event.clone(), category));
        }

        if unmapped_rows > 0 {
            warn!(unmapped_rows, "sequence rows outside the category dictionary were dropped");
        }

        if let Some((start, end)) = request.date_range {
            retained.retain(|(event, _)| {
                let local_date = event.timestamp.with_timezone(&request.timezone).date_naive();
                local_date >= start && local_date <= end
            });
        }

        if retained.is_empty() {
            return Ok(SegmentationOutcome { segments: Vec::new(), dropped_rows: 0, unmapped_rows });
        }

        // Stable sort: events with equal timestamps keep their input order,
        // making the duration deltas (and everything downstream) deterministic.
        retained.sort_by_key(|(event, _)| event.timestamp);

        let durations = compute_durations(&retained);
        let prepared: Vec<PreparedRow> = retained
            .iter()
            .zip(durations)
            .map(|((event, category), duration_minutes)| {
                let local = event.timestamp.with_timezone(&request.timezone);
                PreparedRow {
                    timestamp: event.timestamp,
                    category: *category,
                    date: local.date_naive(),
                    hour: local.hour(),
                    minute_of_day: f64::from(local.num_seconds_from_midnight()) / 60.0,
                    duration_minutes,
                }
            })
            .collect();

        let segments = match request.policy {
            OverflowPolicy::ShowAll => apply_show_all(prepared),
            OverflowPolicy::Hide => apply_hide(prepared),
            OverflowPolicy::RawSplit => apply_split(&prepared, false),
            OverflowPolicy::CleanSplit => apply_split(&prepared, true),
        };

        Ok(SegmentationOutcome { segments, dropped_rows: 0, unmapped_rows })
    }
}

/// Inter-event deltas in minutes; the final event gets the median of the
/// others (a lone event gets 0)
fn compute_durations(rows: &[(SequenceEvent, Category)]) -> Vec<f64> {
    let mut durations = Vec::with_capacity(rows.len());
    for pair in rows.windows(2) {
        let delta = pair[1].0.timestamp.signed_duration_since(pair[0].0.timestamp);
        durations.push((delta.num_milliseconds() as f64 / 60_000.0).abs());
    }
    durations.push(median(&durations));
    durations
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn segment_for(row: &PreparedRow, date: NaiveDate, duration_minutes: f64) -> StateSegment {
    StateSegment {
        timestamp: row.timestamp,
        category: row.category,
        date,
        hour: row.hour,
        duration_minutes,
    }
}

/// `ShowAll`: raw durations are kept even when a day's total exceeds 24h
fn apply_show_all(rows: Vec<PreparedRow>) -> Vec<StateSegment> {
    rows.iter().map(|row| segment_for(row, row.date, row.duration_minutes)).collect()
}

/// `Hide`: a day whose attributed total exceeds 24h is excluded wholesale
fn apply_hide(rows: Vec<PreparedRow>) -> Vec<StateSegment> {
    let mut day_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in &rows {
        *day_totals.entry(row.date).or_insert(0.0) += row.duration_minutes;
    }

    rows.iter()
        .filter(|row| day_totals.get(&row.date).copied().unwrap_or(0.0) <= MINUTES_PER_DAY)
        .map(|row| segment_for(row, row.date, row.duration_minutes))
        .collect()
}

/// `RawSplit` / `CleanSplit`: fold over the sorted stream, splitting events
/// whose duration overflows the current day's remaining capacity
///
/// Split portions keep the originating event's timestamp and hour; only the
/// attributed `date` advances. The segments are emitted in (date, timestamp)
/// order because the accumulator date never moves backwards.
fn apply_split(rows: &[PreparedRow], clean: bool) -> Vec<StateSegment> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let mut acc = SplitAccumulator {
        current_date: first.date,
        day_total: 0.0,
        last_category: None,
    };
    let mut segments = Vec::with_capacity(rows.len());

    for row in rows {
        if row.date > acc.current_date {
            // Day boundary: fresh capacity, duplicate suppression resets
            acc.current_date = row.date;
            acc.day_total = 0.0;
            acc.last_category = None;
        }

        if clean && row.category.is_housekeeping() && acc.last_category == Some(row.category) {
            // Duplicate housekeeping state: skipped rather than counted again
            continue;
        }

        let consumed = if row.date == acc.current_date {
            acc.day_total.max(row.minute_of_day)
        } else {
            acc.day_total
        };
        let capacity = (MINUTES_PER_DAY - consumed).max(0.0);

        if row.duration_minutes <= capacity {
            segments.push(segment_for(row, acc.current_date, row.duration_minutes));
            acc.day_total += row.duration_minutes;
            acc.last_category = Some(row.category);
            continue;
        }

        let mut remaining = row.duration_minutes;
        if capacity > 0.0 {
            segments.push(segment_for(row, acc.current_date, capacity));
            remaining -= capacity;
            acc.last_category = Some(row.category);
        }

        while remaining > 0.0 {
            acc.current_date = acc.current_date.succ_opt().unwrap_or(acc.current_date);
            let mut portion = remaining.min(MINUTES_PER_DAY);
            if clean && row.category.is_housekeeping() {
                portion = portion.min(MAINTENANCE_SPLIT_CAP_MINUTES);
            }

            let duplicate = clean
                && row.category.is_housekeeping()
                && acc.last_category == Some(row.category);
            if !duplicate {
                segments.push(segment_for(row, acc.current_date, portion));
                acc.last_category = Some(row.category);
            }

            remaining -= portion;
            // The day cursor advances even for suppressed portions
            acc.day_total = portion;
        }
    }

    if clean {
        clean_split_post_pass(segments)
    } else {
        segments
    }
}

/// Clean-split validation pass: drop days that still overflow 24h, then
/// prune same-day housekeeping rows that directly follow a row of the same
/// category
fn clean_split_post_pass(segments: Vec<StateSegment>) -> Vec<StateSegment> {
    let mut day_totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for segment in &segments {
        *day_totals.entry(segment.date).or_insert(0.0) += segment.duration_minutes;
    }

    let mut pruned = Vec::with_capacity(segments.len());
    let mut prev: Option<(NaiveDate, Category)> = None;
    for segment in segments {
        if day_totals.get(&segment.date).copied().unwrap_or(0.0) > MINUTES_PER_DAY {
            continue;
        }
        let duplicate =
            segment.category.is_housekeeping() && prev == Some((segment.date, segment.category));
        prev = Some((segment.date, segment.category));
        if !duplicate {
            pruned.push(segment);
        }
    }
    pruned
}
