//! Where each league's category sheets live

use crate::error::{Result, StatsError};
use crate::merge::CategoryTables;
use crate::model::{Category, Granularity, Table};
use crate::normalize::normalize;
use crate::sheets::read_table;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A league and the file prefix of its sheets (`pl` -> `pl_standard.xlsx`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeagueSource {
    pub league: String,
    pub prefix: String,
}

impl LeagueSource {
    pub fn new(league: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            league: league.into(),
            prefix: prefix.into(),
        }
    }

    /// Workbook holding both granularities of one category
    pub fn workbook_path(&self, dir: &Path, category: Category) -> PathBuf {
        dir.join(format!("{}_{}.xlsx", self.prefix, category.file_stem()))
    }
}

pub fn default_leagues() -> Vec<LeagueSource> {
    vec![
        LeagueSource::new("Premier League", "pl"),
        LeagueSource::new("Ligue 1", "li"),
    ]
}

/// Read a `league,prefix` manifest
pub fn read_manifest(path: &Path) -> Result<Vec<LeagueSource>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let leagues = reader
        .deserialize()
        .collect::<std::result::Result<Vec<LeagueSource>, csv::Error>>()?;

    if leagues.is_empty() {
        return Err(StatsError::NoLeagues);
    }
    log::debug!("Manifest {} lists {} leagues", path.display(), leagues.len());
    Ok(leagues)
}

/// Load one category sheet as it is on disk, before normalization
pub fn load_category(
    dir: &Path,
    source: &LeagueSource,
    category: Category,
    granularity: Granularity,
) -> Result<Table> {
    let path = source.workbook_path(dir, category);
    read_table(&path, granularity.sheet_name())
}

/// Load and normalize all six categories of a league
pub fn load_league(dir: &Path, source: &LeagueSource, granularity: Granularity) -> Result<CategoryTables> {
    let load = |category| -> Result<Table> {
        let table = load_category(dir, source, category, granularity)?;
        normalize(category, table)
    };

    let tables = CategoryTables {
        standard: load(Category::Standard)?,
        possession: load(Category::Possession)?,
        passing: load(Category::Passing)?,
        pass_types: load(Category::PassTypes)?,
        misc: load(Category::Misc)?,
        defensive: load(Category::Defensive)?,
    };
    log::debug!(
        "Loaded {} {} sheets for {}",
        Category::ALL.len(),
        granularity,
        source.league
    );
    Ok(tables)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::normalize::tests::sheet;
    use crate::sheets::write_table_csv;
    use std::fs;

    /// Write csv exports of every category sheet for one league
    pub(crate) fn write_league_csv(dir: &Path, source: &LeagueSource, players: &[(&str, &str)], fill: f64) {
        for category in Category::ALL {
            let workbook = source.workbook_path(dir, category);
            for granularity in Granularity::ALL {
                let path = crate::sheets::csv_path(&workbook, granularity.sheet_name());
                write_table_csv(&path, &sheet(category, players, fill)).unwrap();
            }
        }
    }

    #[test]
    fn test_workbook_path() {
        let source = LeagueSource::new("Premier League", "pl");
        assert_eq!(
            source.workbook_path(Path::new("data"), Category::Defensive),
            Path::new("data/pl_defensive_actions.xlsx")
        );
    }

    #[test]
    fn test_read_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leagues.csv");
        fs::write(&path, "league,prefix\nSerie A, sa\nLa Liga,ll\n").unwrap();

        let leagues = read_manifest(&path).unwrap();
        assert_eq!(
            leagues,
            vec![LeagueSource::new("Serie A", "sa"), LeagueSource::new("La Liga", "ll")]
        );
    }

    #[test]
    fn test_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leagues.csv");
        fs::write(&path, "league,prefix\n").unwrap();
        assert!(matches!(read_manifest(&path), Err(StatsError::NoLeagues)));
    }

    #[test]
    fn test_load_league_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let source = LeagueSource::new("Ligue 1", "li");
        write_league_csv(dir.path(), &source, &[("A", "S"), ("B", "T")], 2.0);

        let tables = load_league(dir.path(), &source, Granularity::Per90).unwrap();
        assert_eq!(tables.standard.row_count(), 2);
        assert!(tables.standard.has_column("Goals Scored"));
        assert!(tables.defensive.has_column(crate::normalize::TACKLE_SUCCESS_RATE));
    }

    #[test]
    fn test_missing_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        let source = LeagueSource::new("Ligue 1", "li");
        assert!(load_league(dir.path(), &source, Granularity::Raw).is_err());
    }
}
