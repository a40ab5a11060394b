use crate::error::{Result, StatsError};
use crate::model::{Table, LEAGUE};

fn league_label(table: &Table, position: usize) -> String {
    table
        .value(0, LEAGUE)
        .and_then(|v| v.as_text())
        .map(String::from)
        .unwrap_or_else(|| format!("#{}", position + 1))
}

/// Describe how `found` differs from `expected`
fn schema_difference(expected: &[&str], found: &[&str]) -> String {
    let missing: Vec<&str> = expected
        .iter()
        .filter(|c| !found.contains(c))
        .copied()
        .collect();
    let unexpected: Vec<&str> = found
        .iter()
        .filter(|c| !expected.contains(c))
        .copied()
        .collect();

    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing columns [{}]", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected columns [{}]", unexpected.join(", ")));
    }
    if parts.is_empty() {
        parts.push("columns are in a different order".to_string());
    }
    parts.join("; ")
}

/// Concatenate merged league tables row-wise.
///
/// Every table must have exactly the same columns in the same order as the
/// first; the whole set is checked before anything is concatenated. Rows are
/// kept verbatim, including players that appear in more than one league.
pub fn aggregate_leagues(tables: &[Table]) -> Result<Table> {
    let first = tables.first().ok_or(StatsError::NoLeagues)?;
    let expected = first.headers();

    for (position, table) in tables.iter().enumerate().skip(1) {
        let found = table.headers();
        if found != expected {
            return Err(StatsError::SchemaMismatch {
                league: league_label(table, position),
                detail: schema_difference(&expected, &found),
            });
        }
    }

    let mut unified = Table::new();
    for table in tables {
        unified.append_rows(table);
    }

    log::info!(
        "Aggregated {} leagues into {} rows",
        tables.len(),
        unified.row_count()
    );
    Ok(unified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_league;
    use crate::merge::tests::league_tables;
    use crate::model::PLAYER;

    #[test]
    fn test_concatenates_all_rows() {
        let a = merge_league(
            "Premier League",
            league_tables(&[("A1", "S"), ("A2", "S"), ("A3", "S"), ("A4", "T"), ("A5", "T")], 1.0),
        )
        .unwrap();
        let b = merge_league("Ligue 1", league_tables(&[("B1", "U"), ("B2", "U"), ("B3", "V")], 2.0))
            .unwrap();

        let unified = aggregate_leagues(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(unified.row_count(), 8);
        assert_eq!(unified.headers(), a.headers());
        assert_eq!(unified.take_rows(&[0, 1, 2, 3, 4]), a);
        assert_eq!(unified.take_rows(&[5, 6, 7]), b);
    }

    #[test]
    fn test_cross_league_duplicates_kept() {
        let a = merge_league("Premier League", league_tables(&[("Same", "S")], 1.0)).unwrap();
        let b = merge_league("Ligue 1", league_tables(&[("Same", "S")], 1.0)).unwrap();
        let unified = aggregate_leagues(&[a, b]).unwrap();
        assert_eq!(unified.rows_where(PLAYER, "Same").unwrap().len(), 2);
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let a = merge_league("Premier League", league_tables(&[("A", "S")], 1.0)).unwrap();
        let mut b = merge_league("Ligue 1", league_tables(&[("B", "S")], 1.0)).unwrap();
        b.remove_column("Key Passes");

        let err = aggregate_leagues(&[a, b]).unwrap_err();
        match err {
            StatsError::SchemaMismatch { league, detail } => {
                assert_eq!(league, "Ligue 1");
                assert!(detail.contains("Key Passes"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_column_order_mismatch_rejected() {
        let a = Table::new()
            .with_column("x", vec![1.0.into()])
            .unwrap()
            .with_column("y", vec![1.0.into()])
            .unwrap();
        let b = Table::new()
            .with_column("y", vec![1.0.into()])
            .unwrap()
            .with_column("x", vec![1.0.into()])
            .unwrap();
        let err = aggregate_leagues(&[a, b]).unwrap_err();
        assert!(err.to_string().contains("different order"));
    }

    #[test]
    fn test_no_tables() {
        assert!(matches!(aggregate_leagues(&[]), Err(StatsError::NoLeagues)));
    }
}
