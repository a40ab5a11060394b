//! Per-league merging and cross-league aggregation

pub mod aggregate;
pub mod join;

use crate::error::Result;
use crate::model::{Category, Table, Value, LEAGUE, PLAYER, SQUAD};
use std::collections::{HashMap, HashSet};

pub use aggregate::aggregate_leagues;
pub use join::{duplicate_keys, left_join, JoinOutcome, PlayerKey};

/// The six normalized category tables of one league at one granularity
#[derive(Debug, Clone)]
pub struct CategoryTables {
    pub standard: Table,
    pub possession: Table,
    pub passing: Table,
    pub pass_types: Table,
    pub misc: Table,
    pub defensive: Table,
}

impl CategoryTables {
    pub fn get(&self, category: Category) -> &Table {
        match category {
            Category::Standard => &self.standard,
            Category::Possession => &self.possession,
            Category::Passing => &self.passing,
            Category::PassTypes => &self.pass_types,
            Category::Misc => &self.misc,
            Category::Defensive => &self.defensive,
        }
    }
}

/// Name given to a column that recurs across categories
pub fn qualified_name(name: &str, origin: Category) -> String {
    format!("{}_{}", name, origin.tag())
}

/// Accumulates left joins onto the standard table, tracking which category each
/// column came from so recurring names can be tagged by origin
struct LeagueMerge {
    table: Table,
    origins: HashMap<String, Category>,
    split: HashSet<String>,
}

impl LeagueMerge {
    fn anchor(standard: Table) -> Self {
        let origins = standard
            .headers()
            .into_iter()
            .map(|h| (h.to_string(), Category::Standard))
            .collect();
        Self {
            table: standard,
            origins,
            split: HashSet::new(),
        }
    }

    fn join(&mut self, league: &str, category: Category, mut right: Table) -> Result<()> {
        let incoming: Vec<String> = right
            .headers()
            .into_iter()
            .filter(|h| *h != PLAYER && *h != SQUAD)
            .map(String::from)
            .collect();

        for name in incoming {
            if self.table.has_column(&name) {
                let origin = self.origins.remove(&name).unwrap_or(Category::Standard);
                let existing = qualified_name(&name, origin);
                self.table.rename_column(&name, &existing);
                self.origins.insert(existing, origin);
                self.split.insert(name.clone());
            }
            if self.split.contains(&name) {
                let tagged = qualified_name(&name, category);
                right.rename_column(&name, &tagged);
                self.origins.insert(tagged, category);
            } else {
                self.origins.insert(name, category);
            }
        }

        let outcome = left_join(&self.table, &right)?;
        if outcome.dropped_keys > 0 {
            log::warn!(
                "{}: {} players in {} are absent from Standard and were dropped",
                league,
                outcome.dropped_keys,
                category
            );
        }
        if outcome.duplicate_keys > 0 {
            log::warn!(
                "{}: {} duplicate player/squad keys in {}; matching rows are repeated",
                league,
                outcome.duplicate_keys,
                category
            );
        }
        self.table = outcome.table;
        Ok(())
    }
}

/// Left-join the normalized category tables of one league onto its standard
/// table, in the fixed order possession, passing, pass types, misc, defensive,
/// then tag every row with `league`.
pub fn merge_league(league: &str, tables: CategoryTables) -> Result<Table> {
    let CategoryTables {
        standard,
        possession,
        passing,
        pass_types,
        misc,
        defensive,
    } = tables;

    let mut merge = LeagueMerge::anchor(standard);
    merge.join(league, Category::Possession, possession)?;
    merge.join(league, Category::Passing, passing)?;
    merge.join(league, Category::PassTypes, pass_types)?;
    merge.join(league, Category::Misc, misc)?;
    merge.join(league, Category::Defensive, defensive)?;

    let mut table = merge.table;
    table.push_constant(LEAGUE, Value::Text(league.to_string()));

    log::debug!(
        "Merged {}: {} rows, {} columns",
        league,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}
