use crate::error::{Result, StatsError};
use crate::model::{Table, Value};
use std::cmp::Ordering;

/// Percentile rank (0-100) of every defined value in a column.
///
/// Tied values share the average of their 1-based ranks; the average rank `r`
/// of `n` defined values maps to `(r - 1) / (n - 1) * 100`, so the minimum is 0,
/// the maximum 100 and an all-equal column sits at 50. Undefined cells stay
/// undefined and do not count towards `n`.
pub fn percentile_ranks(column: &str, values: &[Value]) -> Result<Vec<Value>> {
    let mut defined: Vec<(usize, f64)> = Vec::with_capacity(values.len());
    for (row, value) in values.iter().enumerate() {
        match value {
            Value::Text(text) => {
                return Err(StatsError::NonNumeric {
                    column: column.to_string(),
                    row,
                    value: text.clone(),
                })
            }
            _ => {
                if let Some(n) = value.as_number() {
                    defined.push((row, n));
                }
            }
        }
    }

    let mut ranks = vec![Value::Missing; values.len()];
    let n = defined.len();
    if n == 0 {
        return Ok(ranks);
    }
    if n == 1 {
        ranks[defined[0].0] = Value::Number(50.0);
        return Ok(ranks);
    }

    defined.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let scale = 100.0 / (n - 1) as f64;
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && defined[end].1 == defined[start].1 {
            end += 1;
        }
        // 1-based ranks start+1..=end averaged, minus one
        let avg_rank_from_zero = (start + end - 1) as f64 / 2.0;
        let pct = avg_rank_from_zero * scale;
        for &(row, _) in &defined[start..end] {
            ranks[row] = Value::Number(pct);
        }
        start = end;
    }

    Ok(ranks)
}

/// Replace the listed columns with percentile ranks over all rows of `table`.
/// Other columns pass through unchanged.
pub fn percentile_view(table: &Table, columns: &[&str]) -> Result<Table> {
    if let Some(unknown) = columns.iter().find(|c| !table.has_column(c)) {
        return Err(StatsError::UnknownColumn(unknown.to_string()));
    }

    let mut view = Table::new();
    for column in table.columns() {
        let values = if columns.contains(&column.name.as_str()) {
            percentile_ranks(&column.name, &column.values)?
        } else {
            column.values.clone()
        };
        view.push_column(column.name.clone(), values)?;
    }
    Ok(view)
}
