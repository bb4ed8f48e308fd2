//! Aggregations over segmented sequences
//!
//! Consumers of the segmenter output: headline production metrics, daily and
//! hourly pivots, and state-transition counts. All helpers accept an empty
//! slice and return empty mappings or zeroed totals; every percentage guards
//! its denominator and yields 0 instead of dividing by zero.

use std::collections::BTreeMap;

use brolga_domain::{
    Category, CategoryStats, EfficiencyTrend, ProductionSummary, StateSegment,
};
use chrono::{Duration, NaiveDate};

/// Total attributed minutes per category
pub fn total_by_category(segments: &[StateSegment]) -> BTreeMap<Category, f64> {
    let mut totals = BTreeMap::new();
    for segment in segments {
        *totals.entry(segment.category).or_insert(0.0) += segment.duration_minutes;
    }
    totals
}

/// Attributed minutes per (calendar day, category) - the stacked daily
/// distribution chart's data
pub fn daily_distribution(segments: &[StateSegment]) -> BTreeMap<(NaiveDate, Category), f64> {
    let mut totals = BTreeMap::new();
    for segment in segments {
        *totals.entry((segment.date, segment.category)).or_insert(0.0) +=
            segment.duration_minutes;
    }
    totals
}

/// Per-hour category shares, percentage-normalised across categories within
/// each hour
pub fn hourly_pattern(segments: &[StateSegment]) -> BTreeMap<(u32, Category), f64> {
    let mut minutes: BTreeMap<(u32, Category), f64> = BTreeMap::new();
    let mut hour_totals: BTreeMap<u32, f64> = BTreeMap::new();
    for segment in segments {
        *minutes.entry((segment.hour, segment.category)).or_insert(0.0) +=
            segment.duration_minutes;
        *hour_totals.entry(segment.hour).or_insert(0.0) += segment.duration_minutes;
    }

    minutes
        .into_iter()
        .map(|((hour, category), total)| {
            let hour_total = hour_totals.get(&hour).copied().unwrap_or(0.0);
            let share = if hour_total > 0.0 { total / hour_total * 100.0 } else { 0.0 };
            ((hour, category), share)
        })
        .collect()
}

/// Adjacent category transition counts in chronological order
///
/// Raw adjacency: self-transitions are counted, nothing is deduplicated.
pub fn transition_counts(segments: &[StateSegment]) -> BTreeMap<(Category, Category), u64> {
    let mut counts = BTreeMap::new();
    for pair in segments.windows(2) {
        *counts.entry((pair[0].category, pair[1].category)).or_insert(0) += 1;
    }
    counts
}

/// Headline production vs maintenance metrics for a segmented period
pub fn production_summary(segments: &[StateSegment]) -> ProductionSummary {
    let totals = total_by_category(segments);
    let production_minutes = totals.get(&Category::Production).copied().unwrap_or(0.0);
    let maintenance_minutes = totals.get(&Category::Maintenance).copied().unwrap_or(0.0);
    let combined = production_minutes + maintenance_minutes;

    let total_runtime_minutes: f64 = segments.iter().map(|s| s.duration_minutes).sum();
    let state_changes = segments.len();
    let average_duration_minutes = if state_changes > 0 {
        total_runtime_minutes / state_changes as f64
    } else {
        0.0
    };

    ProductionSummary {
        production_minutes,
        maintenance_minutes,
        production_percent: if combined > 0.0 { production_minutes / combined * 100.0 } else { 0.0 },
        maintenance_percent: if combined > 0.0 {
            maintenance_minutes / combined * 100.0
        } else {
            0.0
        },
        production_maintenance_ratio: if maintenance_minutes > 0.0 {
            Some(production_minutes / maintenance_minutes)
        } else {
            None
        },
        total_runtime_minutes,
        average_duration_minutes,
        state_changes,
    }
}

/// Count / total / mean duration per category (the state summary table)
pub fn category_summary(segments: &[StateSegment]) -> BTreeMap<Category, CategoryStats> {
    let mut stats: BTreeMap<Category, CategoryStats> = BTreeMap::new();
    for segment in segments {
        let entry = stats.entry(segment.category).or_default();
        entry.count += 1;
        entry.total_minutes += segment.duration_minutes;
    }
    for entry in stats.values_mut() {
        if entry.count > 0 {
            entry.mean_minutes = entry.total_minutes / entry.count as f64;
        }
    }
    stats
}

/// Trailing-window efficiency comparison over the last `days` days
///
/// The current window ends at the newest segment timestamp; the previous
/// window is the `days` immediately before it. Production efficiency is the
/// production share of each window's total time.
pub fn efficiency_trend(segments: &[StateSegment], days: u32) -> EfficiencyTrend {
    let Some(window_end) = segments.iter().map(|s| s.timestamp).max() else {
        return EfficiencyTrend::default();
    };
    let span = Duration::days(i64::from(days));
    let current_start = window_end - span;
    let previous_start = window_end - span - span;

    let current: Vec<&StateSegment> =
        segments.iter().filter(|s| s.timestamp >= current_start).collect();
    let previous: Vec<&StateSegment> = segments
        .iter()
        .filter(|s| s.timestamp >= previous_start && s.timestamp < current_start)
        .collect();

    let window_metrics = |window: &[&StateSegment]| {
        let mut production = 0.0;
        let mut maintenance = 0.0;
        let mut system = 0.0;
        let mut total = 0.0;
        for segment in window {
            total += segment.duration_minutes;
            match segment.category {
                Category::Production => production += segment.duration_minutes,
                Category::Maintenance => maintenance += segment.duration_minutes,
                Category::System => system += segment.duration_minutes,
                Category::Testing | Category::Manufacturing => {}
            }
        }
        let efficiency = if total > 0.0 { production / total * 100.0 } else { 0.0 };
        (efficiency, system, maintenance)
    };

    let per_day = f64::from(days.max(1));
    let (current_efficiency, current_system, current_maintenance) = window_metrics(&current);
    let (previous_efficiency, previous_system, previous_maintenance) = window_metrics(&previous);

    EfficiencyTrend {
        current_efficiency_percent: current_efficiency,
        previous_efficiency_percent: previous_efficiency,
        current_system_minutes_per_day: current_system / per_day,
        previous_system_minutes_per_day: previous_system / per_day,
        current_maintenance_minutes_per_day: current_maintenance / per_day,
        previous_maintenance_minutes_per_day: previous_maintenance / per_day,
    }
}

/// Percentage change between periods; 0 when the previous period is 0
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}
