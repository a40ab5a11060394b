//! Dashboard views over the unified tables

use crate::error::{Result, StatsError};
use crate::model::{Table, LEAGUE, PLAYER, SQUAD};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Minutes column of the standard table after normalization
pub const MINUTES_PLAYED: &str = "Minutes Played";

/// Default minimum minutes for the per-90 views
pub const DEFAULT_MIN_MINUTES: f64 = 900.0;

/// Keep players with strictly more than `minutes` minutes played.
/// Rows with undefined minutes are removed.
pub fn filter_min_minutes(table: &Table, minutes: f64) -> Result<Table> {
    let played = &table.require(MINUTES_PLAYED)?.values;
    let keep: Vec<usize> = played
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_number().is_some_and(|m| m > minutes))
        .map(|(i, _)| i)
        .collect();

    log::debug!(
        "Minimum {} minutes keeps {} of {} players",
        minutes,
        keep.len(),
        table.row_count()
    );
    Ok(table.take_rows(&keep))
}

/// Sort row indices by a numeric column, highest first, undefined last
fn descending_by(table: &Table, stat: &str, rows: &mut [usize]) -> Result<()> {
    let values = &table.require(stat)?.values;
    rows.sort_by(|&a, &b| match (values[a].as_number(), values[b].as_number()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    Ok(())
}

/// Players of one squad in one league, sorted by `stat` descending.
/// Output columns: `Player`, `stat`.
pub fn leaderboard(table: &Table, league: &str, squad: &str, stat: &str) -> Result<Table> {
    table.require(stat)?;
    let leagues = &table.require(LEAGUE)?.values;
    let squads = &table.require(SQUAD)?.values;

    let mut rows: Vec<usize> = (0..table.row_count())
        .filter(|&i| leagues[i].key_text() == league && squads[i].key_text() == squad)
        .collect();
    descending_by(table, stat, &mut rows)?;

    table.take_rows(&rows).select(&[PLAYER, stat])
}

/// Distinct leagues in first-seen order
pub fn leagues(table: &Table) -> Result<Vec<String>> {
    table.distinct(LEAGUE)
}

/// Distinct squads of one league in first-seen order
pub fn squads(table: &Table, league: &str) -> Result<Vec<String>> {
    let rows = table.rows_where(LEAGUE, league)?;
    table.take_rows(&rows).distinct(SQUAD)
}

/// One point of a two-metric scatterplot
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub player: String,
    pub squad: String,
    pub league: String,
    pub x: f64,
    pub y: f64,
}

/// Points for metrics `x` and `y`; players with either value undefined are skipped
pub fn scatter_series(table: &Table, x: &str, y: &str) -> Result<Vec<ScatterPoint>> {
    let xs = &table.require(x)?.values;
    let ys = &table.require(y)?.values;
    let players = &table.require(PLAYER)?.values;
    let squads = &table.require(SQUAD)?.values;
    let leagues = &table.require(LEAGUE)?.values;

    Ok((0..table.row_count())
        .filter_map(|i| {
            Some(ScatterPoint {
                player: players[i].key_text(),
                squad: squads[i].key_text(),
                league: leagues[i].key_text(),
                x: xs[i].as_number()?,
                y: ys[i].as_number()?,
            })
        })
        .collect())
}

/// Metric groups for two-player radar comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarTemplate {
    Attacking,
    Possession,
    Defensive,
}

impl RadarTemplate {
    pub const ALL: [RadarTemplate; 3] = [
        RadarTemplate::Attacking,
        RadarTemplate::Possession,
        RadarTemplate::Defensive,
    ];

    /// Analytic-subset labels plotted by this template
    pub fn metrics(&self) -> &'static [&'static str] {
        match self {
            RadarTemplate::Attacking => &[
                "Goals Scored",
                "Assists",
                "Dribbles Attempted",
                "Dribble Success %",
                "Key Passes",
                "Crosses into the Penalty Area",
                "Passes into the Penalty Area",
                "Expected Goals",
                "Expected Assists",
                "Assists Overperformance",
            ],
            RadarTemplate::Possession => &[
                "Pass Completion %",
                "Progressive Passes",
                "Carries",
                "Progressive Carries",
                "Progressive Carrying Distance",
                "Progressive Passing Distance",
                "Through Balls",
                "Touches",
                "Progressive Passes Received",
                "Key Passes",
            ],
            RadarTemplate::Defensive => &[
                "Recoveries",
                "Tackles",
                "Tackles Won",
                "Tackle Success Rate",
                "Interceptions",
                "Clearances",
                "Errors Leading to a Shot",
                "Fouls",
                "Aerial Duel Success Rate",
            ],
        }
    }

}

/// Parse a template name ("attacking", "Possession Template", ...)
impl FromStr for RadarTemplate {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        let name = name.strip_suffix(" template").unwrap_or(&name);
        match name {
            "attacking" | "attack" => Ok(RadarTemplate::Attacking),
            "possession" => Ok(RadarTemplate::Possession),
            "defensive" | "defence" | "defense" => Ok(RadarTemplate::Defensive),
            _ => Err(StatsError::UnknownTemplate(s.to_string())),
        }
    }
}

impl fmt::Display for RadarTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RadarTemplate::Attacking => write!(f, "Attacking Template"),
            RadarTemplate::Possession => write!(f, "Possession Template"),
            RadarTemplate::Defensive => write!(f, "Defensive Template"),
        }
    }
}

/// One radar axis for two players
#[derive(Debug, Clone, PartialEq)]
pub struct MetricComparison {
    pub metric: String,
    pub value_a: Option<f64>,
    pub percentile_a: Option<f64>,
    pub value_b: Option<f64>,
    pub percentile_b: Option<f64>,
}

/// Two players side by side on one template
#[derive(Debug, Clone)]
pub struct Comparison {
    pub template: RadarTemplate,
    pub player_a: String,
    pub player_b: String,
    pub metrics: Vec<MetricComparison>,
}

fn player_row(table: &Table, player: &str) -> Result<usize> {
    table
        .rows_where(PLAYER, player)?
        .first()
        .copied()
        .ok_or_else(|| StatsError::UnknownPlayer(player.to_string()))
}

fn number_at(table: &Table, row: usize, column: &str) -> Result<Option<f64>> {
    Ok(table.require(column)?.values.get(row).and_then(|v| v.as_number()))
}

/// Compare two players on a radar template.
///
/// `subset` holds per-90 values and `percentiles` its percentile view, row for
/// row. The first row matching each name is used. Undefined values stay `None`
/// so they render as "no data".
pub fn compare_players(
    subset: &Table,
    percentiles: &Table,
    template: RadarTemplate,
    player_a: &str,
    player_b: &str,
) -> Result<Comparison> {
    let row_a = player_row(subset, player_a)?;
    let row_b = player_row(subset, player_b)?;

    let metrics = template
        .metrics()
        .iter()
        .map(|metric| {
            Ok(MetricComparison {
                metric: metric.to_string(),
                value_a: number_at(subset, row_a, metric)?,
                percentile_a: number_at(percentiles, row_a, metric)?,
                value_b: number_at(subset, row_b, metric)?,
                percentile_b: number_at(percentiles, row_b, metric)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Comparison {
        template,
        player_a: player_a.to_string(),
        player_b: player_b.to_string(),
        metrics,
    })
}

/// Render an optional number for text output
pub fn display_number(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "no data".to_string(),
    }
}
