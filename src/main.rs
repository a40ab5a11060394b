use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use league_stats::analysis::{
    self, compare_players, display_number, filter_min_minutes, leaderboard, metric_names,
    scatter_series, select_analytic, RadarTemplate, DEFAULT_MIN_MINUTES,
};
use league_stats::pipeline::{self, CheckOutcome, PipelineConfig};
use league_stats::sheets::write_table_csv;
use league_stats::source::read_manifest;
use league_stats::xlsx::{self, SheetSpec};
use league_stats::{Granularity, Table, Value, LEAGUE, PLAYER, SQUAD};

#[derive(Parser)]
#[command(name = "league-stats")]
#[command(about = "Merge per-league football stat sheets into unified player tables", long_about = None)]
struct Cli {
    /// Directory holding the category workbooks (or their csv exports)
    #[arg(long, global = true, env = "LEAGUE_STATS_DATA", default_value = "data")]
    data_dir: PathBuf,

    /// CSV file with `league,prefix` rows replacing the default leagues
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Per-90 views only keep players with more minutes than this
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_MINUTES)]
    min_minutes: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the unified tables and write them out
    Build {
        /// Output .xlsx workbook, or a directory for csv files
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check every source sheet without merging
    Validate,

    /// Rank one squad's players by a raw stat
    Leaders {
        #[arg(long)]
        league: String,

        #[arg(long)]
        squad: String,

        #[arg(long, default_value = "Goals Scored")]
        stat: String,

        /// Number of players to show
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Two analytic metrics per player
    Scatter {
        #[arg(long)]
        x: String,

        #[arg(long)]
        y: String,

        /// Write points to a csv file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two players on a radar template
    Compare {
        #[arg(long)]
        player_a: String,

        #[arg(long)]
        player_b: String,

        /// attacking, possession or defensive
        #[arg(long, default_value = "attacking")]
        template: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = pipeline_config(&cli)?;

    match cli.command {
        Commands::Build { output } => {
            build(&config, &output)?;
        }
        Commands::Validate => {
            validate(&config)?;
        }
        Commands::Leaders { league, squad, stat, top } => {
            leaders(&config, &league, &squad, &stat, top)?;
        }
        Commands::Scatter { x, y, output } => {
            scatter(&config, &x, &y, output.as_deref())?;
        }
        Commands::Compare { player_a, player_b, template } => {
            compare(&config, &player_a, &player_b, &template)?;
        }
    }

    Ok(())
}

fn pipeline_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::new(&cli.data_dir).with_min_minutes(cli.min_minutes);
    if let Some(manifest) = &cli.manifest {
        let leagues = read_manifest(manifest)
            .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
        config = config.with_leagues(leagues);
    }
    Ok(config)
}

/// Analytic subset of the per-90 players over the minutes threshold
fn analytic_subset(config: &PipelineConfig) -> Result<Table> {
    let per90 = pipeline::unify(config, Granularity::Per90).context("Failed to merge per-90 sheets")?;
    let eligible = filter_min_minutes(&per90, config.min_minutes)?;
    Ok(select_analytic(&eligible)?)
}

fn build(config: &PipelineConfig, output: &Path) -> Result<()> {
    println!("Reading sheets from: {}", config.data_dir.display());
    let out = pipeline::run_pipeline(config).context("Failed to build unified tables")?;

    println!("Raw rows: {}", out.raw.row_count());
    println!("Per 90 rows: {}", out.per90.row_count());
    println!(
        "Players over {} minutes: {}",
        config.min_minutes,
        out.analytic.row_count()
    );

    let is_workbook = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));

    if is_workbook {
        println!("Writing Excel file: {}", output.display());
        let metrics = metric_names();
        xlsx::write_workbook(
            output,
            &[
                SheetSpec::plain("Raw", &out.raw),
                SheetSpec::plain("Per 90", &out.per90),
                SheetSpec::plain("Analytic", &out.analytic),
                SheetSpec::percentiles("Percentiles", &out.percentiles, &metrics),
            ],
        )
        .context("Failed to write Excel file")?;
    } else {
        println!("Writing csv files to: {}", output.display());
        std::fs::create_dir_all(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        for (name, table) in [
            ("raw.csv", &out.raw),
            ("per_90.csv", &out.per90),
            ("analytic.csv", &out.analytic),
            ("percentiles.csv", &out.percentiles),
        ] {
            write_table_csv(&output.join(name), table)
                .with_context(|| format!("Failed to write {}", name))?;
        }
    }

    println!("Done!");
    Ok(())
}

fn validate(config: &PipelineConfig) -> Result<()> {
    let checks = pipeline::validate_sources(config);
    let mut problems = 0;

    for check in &checks {
        let label = format!(
            "{} {} ({})",
            check.league,
            check.category,
            check.granularity.sheet_name()
        );
        match &check.outcome {
            CheckOutcome::Unreadable(e) => {
                println!("{}: cannot read {}: {}", label, check.path.display(), e);
            }
            CheckOutcome::Checked { rows, missing, duplicates } => {
                println!("{}: {} rows", label, rows);
                for column in missing {
                    println!("    - missing column '{}'", column);
                }
                for ((player, squad), count) in duplicates {
                    println!("    - {} / {} appears {} times", player, squad, count);
                }
            }
        }
        if !check.is_clean() {
            problems += 1;
        }
    }

    if problems > 0 {
        anyhow::bail!("{} of {} sheets have problems", problems, checks.len());
    }
    println!("All {} sheets are valid", checks.len());
    Ok(())
}

fn leaders(config: &PipelineConfig, league: &str, squad: &str, stat: &str, top: usize) -> Result<()> {
    let raw = pipeline::unify(config, Granularity::Raw).context("Failed to merge raw sheets")?;

    let known = analysis::leagues(&raw)?;
    if !known.iter().any(|l| l == league) {
        anyhow::bail!("Unknown league '{}' (available: {})", league, known.join(", "));
    }
    let squads = analysis::squads(&raw, league)?;
    if !squads.iter().any(|s| s == squad) {
        anyhow::bail!("Unknown squad '{}' in {} (available: {})", squad, league, squads.join(", "));
    }

    let board = leaderboard(&raw, league, squad, stat)?;
    println!("{} - {}: {}", league, squad, stat);
    for row in 0..board.row_count().min(top) {
        let player = board.value(row, PLAYER).map(Value::key_text).unwrap_or_default();
        let value = board
            .value(row, stat)
            .map(Value::display_or_no_data)
            .unwrap_or_default();
        println!("  {:>3}. {:<30} {}", row + 1, player, value);
    }
    Ok(())
}

fn scatter(config: &PipelineConfig, x: &str, y: &str, output: Option<&Path>) -> Result<()> {
    let subset = analytic_subset(config)?;
    let points = scatter_series(&subset, x, y)?;

    match output {
        Some(path) => {
            let table = Table::new()
                .with_column(PLAYER, points.iter().map(|p| p.player.as_str().into()).collect())?
                .with_column(SQUAD, points.iter().map(|p| p.squad.as_str().into()).collect())?
                .with_column(LEAGUE, points.iter().map(|p| p.league.as_str().into()).collect())?
                .with_column(x, points.iter().map(|p| p.x.into()).collect())?
                .with_column(y, points.iter().map(|p| p.y.into()).collect())?;
            write_table_csv(path, &table).context("Failed to write scatter csv")?;
            println!("Wrote {} points to {}", points.len(), path.display());
        }
        None => {
            println!("{} vs {} ({} players)", x, y, points.len());
            for p in &points {
                println!("  {} ({}, {}): {:.2}, {:.2}", p.player, p.squad, p.league, p.x, p.y);
            }
        }
    }
    Ok(())
}

fn compare(config: &PipelineConfig, player_a: &str, player_b: &str, template: &str) -> Result<()> {
    let template: RadarTemplate = template.parse()?;

    let subset = analytic_subset(config)?;
    let percentiles = analysis::analytic_percentiles(&subset)?;
    let cmp = compare_players(&subset, &percentiles, template, player_a, player_b)?;

    println!("{}: {} vs {}", cmp.template, cmp.player_a, cmp.player_b);
    println!(
        "  {:<32} {:>10} {:>8} {:>10} {:>8}",
        "Metric", "A per 90", "A pct", "B per 90", "B pct"
    );
    for m in &cmp.metrics {
        println!(
            "  {:<32} {:>10} {:>8} {:>10} {:>8}",
            m.metric,
            display_number(m.value_a),
            display_number(m.percentile_a),
            display_number(m.value_b),
            display_number(m.percentile_b)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "league-stats",
            "--data-dir",
            "sheets",
            "compare",
            "--player-a",
            "A",
            "--player-b",
            "B",
            "--template",
            "defensive",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("sheets"));
        assert_eq!(cli.min_minutes, DEFAULT_MIN_MINUTES);
        match cli.command {
            Commands::Compare { player_a, player_b, template } => {
                assert_eq!((player_a.as_str(), player_b.as_str()), ("A", "B"));
                assert_eq!(template.parse::<RadarTemplate>().unwrap(), RadarTemplate::Defensive);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["league-stats", "build", "-o", "out.xlsx", "--min-minutes", "450"])
            .unwrap();
        assert_eq!(cli.min_minutes, 450.0);
        assert!(matches!(cli.command, Commands::Build { .. }));
    }

    #[test]
    fn test_display_number_reexported() {
        assert_eq!(display_number(Some(2.5)), "2.50");
    }
}
