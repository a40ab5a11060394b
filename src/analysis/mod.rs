//! Analytic subset, percentile view and dashboard views

pub mod percentile;
pub mod selector;
pub mod views;

pub use percentile::{percentile_ranks, percentile_view};
pub use selector::{metric_names, select_analytic, ANALYTIC_METRICS};
pub use views::{
    compare_players, display_number, filter_min_minutes, leaderboard, leagues, scatter_series,
    squads, Comparison, MetricComparison, RadarTemplate, ScatterPoint, DEFAULT_MIN_MINUTES,
    MINUTES_PLAYED,
};

use crate::error::Result;
use crate::model::Table;

/// Percentile view of the analytic subset over every analytic metric
pub fn analytic_percentiles(subset: &Table) -> Result<Table> {
    percentile_view(subset, &metric_names())
}
