//! Aggregate metric types derived from segmented sequences

use serde::{Deserialize, Serialize};

/// Production vs maintenance headline metrics for a segmented period
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionSummary {
    /// Minutes attributed to Production
    pub production_minutes: f64,
    /// Minutes attributed to Maintenance
    pub maintenance_minutes: f64,
    /// Production share of the production+maintenance total, in percent
    pub production_percent: f64,
    /// Maintenance share of the production+maintenance total, in percent
    pub maintenance_percent: f64,
    /// Production/maintenance ratio; `None` when no maintenance time exists
    pub production_maintenance_ratio: Option<f64>,
    /// Total minutes across all retained categories
    pub total_runtime_minutes: f64,
    /// Mean segment duration in minutes (0 for an empty period)
    pub average_duration_minutes: f64,
    /// Number of segments (state changes) in the period
    pub state_changes: usize,
}

/// Count / total / mean duration for one category
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    /// Number of segments
    pub count: u64,
    /// Total duration in minutes
    pub total_minutes: f64,
    /// Mean duration in minutes
    pub mean_minutes: f64,
}

/// Trailing-window efficiency comparison (current period vs the one before)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EfficiencyTrend {
    /// Production share of total time in the current window, in percent
    pub current_efficiency_percent: f64,
    /// Production share of total time in the preceding window, in percent
    pub previous_efficiency_percent: f64,
    /// System minutes per day in the current window
    pub current_system_minutes_per_day: f64,
    /// System minutes per day in the preceding window
    pub previous_system_minutes_per_day: f64,
    /// Maintenance minutes per day in the current window
    pub current_maintenance_minutes_per_day: f64,
    /// Maintenance minutes per day in the preceding window
    pub previous_maintenance_minutes_per_day: f64,
}
