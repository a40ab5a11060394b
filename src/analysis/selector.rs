use crate::error::{Result, StatsError};
use crate::model::{Table, LEAGUE, PLAYER, SQUAD};

/// Analytic metrics: (column in the merged per-90 table, final label).
///
/// Columns tagged `_poss`/`_pass`/... are the ones that recur across categories.
/// Possession-origin `PrgDist` is carrying distance, passing-origin is passing
/// distance.
pub const ANALYTIC_METRICS: &[(&str, &str)] = &[
    // Scoring
    ("Goals Scored", "Goals Scored"),
    ("Assists", "Assists"),
    ("Goals + Assists", "Goals + Assists"),
    ("Non-Penalty Goals", "Non-Penalty Goals"),
    ("Penalties Scored", "Penalties Scored"),
    ("Penalties Attempted", "Penalties Attempted"),
    ("Yellow Cards", "Yellow Cards"),
    ("Red Cards", "Red Cards"),
    ("Expected Goals", "Expected Goals"),
    ("Non-Penalty Expected Goals", "Non-Penalty Expected Goals"),
    ("Expected Assists", "Expected Assists"),
    ("Progressive Carries", "Progressive Carries"),
    ("Progressive Passes", "Progressive Passes"),
    ("Progressive Passes Received_poss", "Progressive Passes Received"),
    // Possession
    ("Touches", "Touches"),
    ("Touches in the Defensive Penalty Area", "Touches in the Defensive Penalty Area"),
    ("Defensive 1/3 Touches", "Defensive 1/3 Touches"),
    ("Middle 1/3 Touches", "Middle 1/3 Touches"),
    ("Touches in the Attacking Third", "Touches in the Attacking Third"),
    ("Attacking Penalty Area Touches", "Attacking Penalty Area Touches"),
    ("Dribbles Attempted", "Dribbles Attempted"),
    ("Dribble Success %", "Dribble Success %"),
    ("Carries", "Carries"),
    ("Total Carry Distance", "Total Carry Distance"),
    ("PrgDist_poss", "Progressive Carrying Distance"),
    ("PrgC", "Progressive Carries (Possession)"),
    ("Carries into the Penalty Area", "Carries into the Penalty Area"),
    ("Passes Received", "Passes Received"),
    // Passing
    ("Passes Attempted", "Passes Attempted"),
    ("Pass Completion %", "Pass Completion %"),
    ("TotDist", "Total Passing Distance"),
    ("PrgDist_pass", "Progressive Passing Distance"),
    ("Cmp.1", "Short Passes Completed"),
    ("Att.1", "Short Passes Attempted"),
    ("Cmp%.1", "Short Pass Completion %"),
    ("Cmp.2", "Medium Passes Completed"),
    ("Att.2", "Medium Passes Attempted"),
    ("Cmp%.2", "Medium Pass Completion %"),
    ("Cmp.3", "Long Passes Completed"),
    ("Att.3", "Long Passes Attempted"),
    ("Cmp%.3", "Long Pass Completion %"),
    ("Assists Overperformance", "Assists Overperformance"),
    ("Key Passes", "Key Passes"),
    ("Passes into the Penalty Area", "Passes into the Penalty Area"),
    ("Crosses into the Penalty Area", "Crosses into the Penalty Area"),
    // Pass types
    ("Live_ptype", "Live Ball Passes"),
    ("Dead", "Dead Ball Passes"),
    ("TB", "Through Balls"),
    ("Switches", "Switches"),
    ("Crs_ptype", "Crosses"),
    ("CK", "Corner Kicks"),
    // Discipline and duels
    ("Fouls", "Fouls"),
    ("Fouls Drawn", "Fouls Drawn"),
    ("Penalty Kicks Won", "Penalty Kicks Won"),
    ("PKcon", "Penalties Conceded"),
    ("Recoveries", "Recoveries"),
    ("Won", "Aerial Duels Won"),
    ("Aerial Duel Success Rate", "Aerial Duel Success Rate"),
    // Defending
    ("Tackles", "Tackles"),
    ("TklW_def", "Tackles Won"),
    ("Def 3rd", "Defensive 3rd Tackles"),
    ("Mid 3rd", "Middle 3rd Tackles"),
    ("Att 3rd", "Attacking 3rd Tackles"),
    ("Int_def", "Interceptions"),
    ("Tkl+Int", "Tackles + Interceptions"),
    ("Clr", "Clearances"),
    ("Err", "Errors Leading to a Shot"),
    ("Tackle Success Rate", "Tackle Success Rate"),
];

/// Final labels of the analytic metrics, in output order
pub fn metric_names() -> Vec<&'static str> {
    ANALYTIC_METRICS.iter().map(|(_, label)| *label).collect()
}

/// Project the per-90 unified dataset onto the analytic subset.
///
/// Output columns: `Player`, `Squad`, the metrics under their final labels,
/// then `League`. A listed column the merge did not produce is an error.
pub fn select_analytic(per90: &Table) -> Result<Table> {
    let drift = [PLAYER, SQUAD, LEAGUE]
        .into_iter()
        .chain(ANALYTIC_METRICS.iter().map(|(source, _)| *source))
        .find(|name| !per90.has_column(name));
    if let Some(name) = drift {
        return Err(StatsError::SelectorDrift(name.to_string()));
    }

    let mut subset = per90.select(&[PLAYER, SQUAD])?;
    for (source, label) in ANALYTIC_METRICS {
        let column = per90.require(source)?;
        subset.push_column(*label, column.values.clone())?;
    }
    subset.push_column(LEAGUE, per90.require(LEAGUE)?.values.clone())?;

    log::debug!(
        "Selected {} analytic metrics for {} players",
        ANALYTIC_METRICS.len(),
        subset.row_count()
    );
    Ok(subset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::tests::league_tables;
    use crate::merge::{aggregate_leagues, merge_league};
    use std::collections::HashSet;

    fn unified() -> Table {
        let a = merge_league("Premier League", league_tables(&[("A", "S"), ("B", "S")], 1.0)).unwrap();
        let b = merge_league("Ligue 1", league_tables(&[("C", "T")], 2.0)).unwrap();
        aggregate_leagues(&[a, b]).unwrap()
    }

    #[test]
    fn test_selection_matches_merged_columns() {
        let subset = select_analytic(&unified()).unwrap();
        assert_eq!(subset.row_count(), 3);
        assert_eq!(subset.column_count(), ANALYTIC_METRICS.len() + 3);
        let headers = subset.headers();
        assert_eq!(&headers[..2], &[PLAYER, SQUAD]);
        assert_eq!(headers.last(), Some(&LEAGUE));
        assert!(subset.has_column("Progressive Carries"));
        assert!(subset.has_column("Progressive Carries (Possession)"));
    }

    #[test]
    fn test_labels_unique() {
        let labels: HashSet<&str> = metric_names().into_iter().collect();
        assert_eq!(labels.len(), ANALYTIC_METRICS.len());
    }

    #[test]
    fn test_recurring_columns_resolved() {
        let mut table = unified();
        // Distinguish the two distance columns
        table.column_mut("PrgDist_poss").unwrap().values = vec![10.0.into(); 3];
        table.column_mut("PrgDist_pass").unwrap().values = vec![20.0.into(); 3];
        // Standard PrgC is renamed; the possession sheet's PrgC is its own column
        table.column_mut("Progressive Carries").unwrap().values = vec![4.0.into(); 3];
        table.column_mut("PrgC").unwrap().values = vec![6.0.into(); 3];

        let subset = select_analytic(&table).unwrap();
        assert_eq!(
            subset.value(0, "Progressive Carrying Distance").unwrap().as_number(),
            Some(10.0)
        );
        assert_eq!(
            subset.value(0, "Progressive Passing Distance").unwrap().as_number(),
            Some(20.0)
        );
        assert!(subset.has_column("Progressive Passes Received"));
        assert_eq!(subset.value(0, "Progressive Carries").unwrap().as_number(), Some(4.0));
        assert_eq!(
            subset.value(0, "Progressive Carries (Possession)").unwrap().as_number(),
            Some(6.0)
        );
    }

    #[test]
    fn test_drift_is_fatal() {
        let mut table = unified();
        table.remove_column("Int_def");
        match select_analytic(&table) {
            Err(StatsError::SelectorDrift(name)) => assert_eq!(name, "Int_def"),
            other => panic!("expected drift error, got {:?}", other.map(|t| t.row_count())),
        }
    }
}
