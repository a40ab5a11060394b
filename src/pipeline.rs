//! Loading, merging and deriving every output table in one run

use crate::analysis::{analytic_percentiles, filter_min_minutes, select_analytic, DEFAULT_MIN_MINUTES};
use crate::error::{Result, StatsError};
use crate::merge::{aggregate_leagues, duplicate_keys, merge_league, PlayerKey};
use crate::model::{Category, Granularity, Table, PLAYER, SQUAD};
use crate::normalize::missing_columns;
use crate::sheets::csv_path;
use crate::source::{default_leagues, load_category, load_league, LeagueSource};
use std::path::PathBuf;

/// Where the sheets are and which leagues to merge
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub leagues: Vec<LeagueSource>,
    /// Per-90 players must have strictly more minutes than this
    pub min_minutes: f64,
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            leagues: default_leagues(),
            min_minutes: DEFAULT_MIN_MINUTES,
        }
    }

    pub fn with_leagues(mut self, leagues: Vec<LeagueSource>) -> Self {
        self.leagues = leagues;
        self
    }

    pub fn with_min_minutes(mut self, min_minutes: f64) -> Self {
        self.min_minutes = min_minutes;
        self
    }
}

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Unified dataset of season totals
    pub raw: Table,
    /// Unified dataset of per-90 rates
    pub per90: Table,
    /// Analytic subset of the per-90 players over the minutes threshold
    pub analytic: Table,
    /// Percentile view of `analytic`
    pub percentiles: Table,
}

/// Merge every configured league at one granularity and stack the results
pub fn unify(config: &PipelineConfig, granularity: Granularity) -> Result<Table> {
    if config.leagues.is_empty() {
        return Err(StatsError::NoLeagues);
    }

    let mut merged = Vec::with_capacity(config.leagues.len());
    for source in &config.leagues {
        let tables = load_league(&config.data_dir, source, granularity)?;
        merged.push(merge_league(&source.league, tables)?);
    }
    aggregate_leagues(&merged)
}

/// Run the whole pipeline. The first error aborts the run.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutput> {
    log::info!(
        "Building from {} ({} leagues)",
        config.data_dir.display(),
        config.leagues.len()
    );

    let raw = unify(config, Granularity::Raw)?;
    let per90 = unify(config, Granularity::Per90)?;

    let eligible = filter_min_minutes(&per90, config.min_minutes)?;
    let analytic = select_analytic(&eligible)?;
    let percentiles = analytic_percentiles(&analytic)?;

    log::info!(
        "Unified {} raw and {} per-90 rows; {} players over {} minutes",
        raw.row_count(),
        per90.row_count(),
        analytic.row_count(),
        config.min_minutes
    );

    Ok(PipelineOutput {
        raw,
        per90,
        analytic,
        percentiles,
    })
}

/// What `validate_sources` found for one sheet
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Unreadable(String),
    Checked {
        rows: usize,
        missing: Vec<&'static str>,
        duplicates: Vec<(PlayerKey, usize)>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceCheck {
    pub league: String,
    pub category: Category,
    pub granularity: Granularity,
    pub path: PathBuf,
    pub outcome: CheckOutcome,
}

impl SourceCheck {
    /// True when the sheet can be merged without schema errors or fan-out
    pub fn is_clean(&self) -> bool {
        match &self.outcome {
            CheckOutcome::Unreadable(_) => false,
            CheckOutcome::Checked {
                missing,
                duplicates,
                ..
            } => missing.is_empty() && duplicates.is_empty(),
        }
    }
}

fn check_table(category: Category, table: &Table) -> Result<CheckOutcome> {
    let missing = missing_columns(category, table);
    // Without both key columns there are no keys to compare; `missing` names them
    let duplicates = if missing.contains(&PLAYER) || missing.contains(&SQUAD) {
        Vec::new()
    } else {
        duplicate_keys(table)?
    };
    Ok(CheckOutcome::Checked {
        rows: table.row_count(),
        missing,
        duplicates,
    })
}

/// Check every source sheet against its expected schema and list duplicate
/// player/squad keys, without merging anything
pub fn validate_sources(config: &PipelineConfig) -> Vec<SourceCheck> {
    let mut checks = Vec::new();

    for source in &config.leagues {
        for category in Category::ALL {
            for granularity in Granularity::ALL {
                let workbook = source.workbook_path(&config.data_dir, category);
                let path = if workbook.exists() {
                    workbook
                } else {
                    csv_path(&workbook, granularity.sheet_name())
                };

                let outcome = load_category(&config.data_dir, source, category, granularity)
                    .and_then(|table| check_table(category, &table))
                    .unwrap_or_else(|e| CheckOutcome::Unreadable(e.to_string()));

                checks.push(SourceCheck {
                    league: source.league.clone(),
                    category,
                    granularity,
                    path,
                    outcome,
                });
            }
        }
    }
    checks
}
