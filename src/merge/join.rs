use crate::error::Result;
use crate::model::{Table, Value, PLAYER, SQUAD};
use std::collections::{HashMap, HashSet};

/// (player, squad) in text form
pub type PlayerKey = (String, String);

/// Result of one left join
#[derive(Debug)]
pub struct JoinOutcome {
    pub table: Table,
    /// Keys present in the right table but absent from the left (their rows are lost)
    pub dropped_keys: usize,
    /// Keys appearing more than once in the right table (their left rows fan out)
    pub duplicate_keys: usize,
}

fn keys(table: &Table) -> Result<Vec<PlayerKey>> {
    let players = &table.require(PLAYER)?.values;
    let squads = &table.require(SQUAD)?.values;
    Ok(players
        .iter()
        .zip(squads)
        .map(|(p, s)| (p.key_text(), s.key_text()))
        .collect())
}

/// Keys occurring more than once, with their counts, in first-seen order
pub fn duplicate_keys(table: &Table) -> Result<Vec<(PlayerKey, usize)>> {
    let mut counts: HashMap<PlayerKey, usize> = HashMap::new();
    let mut order = Vec::new();
    for key in keys(table)? {
        let count = counts.entry(key.clone()).or_insert(0);
        if *count == 0 {
            order.push(key);
        }
        *count += 1;
    }
    Ok(order
        .into_iter()
        .filter_map(|key| {
            let n = counts[&key];
            (n > 1).then_some((key, n))
        })
        .collect())
}

/// Left outer join on (Player, Squad).
///
/// Every left row is kept; a left row with no match gets `Missing` in the right
/// columns, and one with several matches is repeated once per match. The right
/// table's key columns are not copied. Column names are taken as-is, so callers
/// resolve collisions first.
pub fn left_join(left: &Table, right: &Table) -> Result<JoinOutcome> {
    let left_keys = keys(left)?;
    let right_keys = keys(right)?;

    let mut index: HashMap<&PlayerKey, Vec<usize>> = HashMap::new();
    for (row, key) in right_keys.iter().enumerate() {
        index.entry(key).or_default().push(row);
    }
    let duplicate_keys = index.values().filter(|rows| rows.len() > 1).count();

    let left_set: HashSet<&PlayerKey> = left_keys.iter().collect();
    let dropped_keys = index.keys().filter(|key| !left_set.contains(*key)).count();

    // (left row, matching right row) pairs in output order
    let mut pairs: Vec<(usize, Option<usize>)> = Vec::with_capacity(left_keys.len());
    for (row, key) in left_keys.iter().enumerate() {
        match index.get(key) {
            Some(matches) => pairs.extend(matches.iter().map(|&m| (row, Some(m)))),
            None => pairs.push((row, None)),
        }
    }

    let left_rows: Vec<usize> = pairs.iter().map(|(l, _)| *l).collect();
    let mut table = left.take_rows(&left_rows);

    for column in right.columns() {
        if column.name == PLAYER || column.name == SQUAD {
            continue;
        }
        let values = pairs
            .iter()
            .map(|(_, r)| match r {
                Some(r) => column.values[*r].clone(),
                None => Value::Missing,
            })
            .collect();
        table.push_column(column.name.clone(), values)?;
    }

    Ok(JoinOutcome {
        table,
        dropped_keys,
        duplicate_keys,
    })
}
