//! Column normalization for category sheets

pub mod schema;

use crate::error::{Result, StatsError};
use crate::model::{Category, Table, Value};

pub use schema::{schema, CategorySchema};

/// Derived column added to the defensive actions table
pub const TACKLE_SUCCESS_RATE: &str = "Tackle Success Rate";

/// Expected source columns absent from `table`, in schema order
pub fn missing_columns(category: Category, table: &Table) -> Vec<&'static str> {
    schema(category)
        .expected_columns()
        .into_iter()
        .filter(|col| !table.has_column(col))
        .collect()
}

/// Fail on the first expected column the sheet does not provide
pub fn validate(category: Category, table: &Table) -> Result<()> {
    match missing_columns(category, table).first() {
        Some(column) => Err(StatsError::MissingColumn {
            category,
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

/// Rename source codes to descriptive labels and drop categorical columns.
/// Column order is preserved; rows are never filtered.
pub fn normalize(category: Category, mut table: Table) -> Result<Table> {
    validate(category, &table)?;
    let schema = schema(category);

    for (from, to) in schema.renames {
        table.rename_column(from, to);
    }
    for column in schema.drops {
        table.remove_column(column);
    }

    if category == Category::Defensive {
        add_tackle_success_rate(&mut table)?;
    }

    log::debug!(
        "Normalized {} table: {} rows, {} columns",
        category,
        table.row_count(),
        table.column_count()
    );
    Ok(table)
}

/// Tackles won as a percentage of tackles attempted.
/// Zero attempts leave the cell undefined rather than zero.
fn add_tackle_success_rate(table: &mut Table) -> Result<()> {
    let won = &table.require("TklW")?.values;
    let attempted = &table.require("Tackles")?.values;

    let rates: Vec<Value> = won
        .iter()
        .zip(attempted)
        .map(|(won, attempted)| tackle_success_rate(won, attempted))
        .collect();

    table.push_column(TACKLE_SUCCESS_RATE, rates)
}

fn tackle_success_rate(won: &Value, attempted: &Value) -> Value {
    match (won.as_number(), attempted.as_number()) {
        (Some(won), Some(attempted)) => {
            let rate = won / attempted * 100.0;
            if rate.is_finite() {
                Value::Number(rate)
            } else {
                Value::Missing
            }
        }
        _ => Value::Missing,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{PLAYER, SQUAD};

    /// A sheet providing exactly the expected columns of `category`, one row per
    /// (player, squad) pair, numeric cells filled with `fill`
    pub(crate) fn sheet(category: Category, players: &[(&str, &str)], fill: f64) -> Table {
        let mut table = Table::new();
        for column in schema(category).expected_columns() {
            let values = players
                .iter()
                .map(|(player, squad)| match column {
                    PLAYER => Value::Text(player.to_string()),
                    SQUAD => Value::Text(squad.to_string()),
                    "Pos" | "Nation" | "Matches" => Value::Text("x".to_string()),
                    _ => Value::Number(fill),
                })
                .collect();
            table.push_column(column, values).unwrap();
        }
        table
    }

    #[test]
    fn test_normalize_renames_in_place() {
        let raw = sheet(Category::Standard, &[("X", "Y")], 1.0);
        let before = raw.headers().iter().position(|h| *h == "Gls").unwrap();
        let table = normalize(Category::Standard, raw).unwrap();
        assert_eq!(table.headers()[before], "Goals Scored");
        assert!(!table.has_column("Gls"));
    }

    #[test]
    fn test_standard_keeps_categorical() {
        let mut raw = sheet(Category::Standard, &[("X", "Y")], 1.0);
        raw.push_column("Pos", vec!["FW".into()]).unwrap();
        let table = normalize(Category::Standard, raw).unwrap();
        assert!(table.has_column("Pos"));
    }

    #[test]
    fn test_normalize_drops_categorical() {
        let table = normalize(Category::Passing, sheet(Category::Passing, &[("X", "Y")], 1.0)).unwrap();
        for col in ["Pos", "Age", "Born", "90s", "Nation", "Matches"] {
            assert!(!table.has_column(col), "{} should be dropped", col);
        }
        assert!(table.has_column("Passes Attempted"));
        assert!(table.has_column("Cmp.1"));
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_pass_types_drops_att() {
        let table = normalize(Category::PassTypes, sheet(Category::PassTypes, &[("X", "Y")], 1.0)).unwrap();
        assert!(!table.has_column("Att"));
        assert!(table.has_column("Switches"));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let mut raw = sheet(Category::Possession, &[("X", "Y")], 1.0);
        raw.remove_column("PrgR");
        let err = normalize(Category::Possession, raw).unwrap_err();
        match err {
            StatsError::MissingColumn { category, column } => {
                assert_eq!(category, Category::Possession);
                assert_eq!(column, "PrgR");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_columns_lists_all() {
        let mut raw = sheet(Category::Misc, &[("X", "Y")], 1.0);
        raw.remove_column("Won");
        raw.remove_column("Recov");
        assert_eq!(missing_columns(Category::Misc, &raw), vec!["Recov", "Won"]);
    }

    #[test]
    fn test_tackle_success_rate() {
        let mut raw = sheet(Category::Defensive, &[("A", "S"), ("B", "S"), ("C", "S")], 0.0);
        raw.column_mut("Tkl").unwrap().values = vec![4.0.into(), 0.0.into(), 5.0.into()];
        raw.column_mut("TklW").unwrap().values = vec![3.0.into(), 0.0.into(), Value::Missing];

        let table = normalize(Category::Defensive, raw).unwrap();
        let rates = &table.require(TACKLE_SUCCESS_RATE).unwrap().values;
        assert_eq!(rates[0].as_number(), Some(75.0));
        // Zero attempts: undefined, never zero
        assert!(rates[1].is_undefined());
        assert_ne!(rates[1], Value::Number(0.0));
        assert!(rates[2].is_undefined());
    }
}
