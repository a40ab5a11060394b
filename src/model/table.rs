use crate::error::{Result, StatsError};
use std::fmt;

/// Player name column, first half of the join key
pub const PLAYER: &str = "Player";
/// Squad name column, second half of the join key
pub const SQUAD: &str = "Squad";
/// League tag attached by the merger
pub const LEAGUE: &str = "League";

/// A single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce raw sheet text into a cell.
    /// Empty strings are missing; numbers may carry thousands separators ("1,234").
    /// Words the float parser accepts ("NaN", "inf") stay text.
    pub fn parse(s: &str) -> Value {
        let s = s.trim();
        if s.is_empty() {
            return Value::Missing;
        }
        let numeric = s.replace(',', "");
        match numeric.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(s.to_string()),
        }
    }

    /// Numeric value, or None when missing, textual or non-finite
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for cells that carry no usable data ("no data" when rendered)
    pub fn is_undefined(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(n) => !n.is_finite(),
            Value::Text(_) => false,
        }
    }

    /// Cell rendered for text output; undefined cells read "no data"
    pub fn display_or_no_data(&self) -> String {
        if self.is_undefined() {
            "no data".to_string()
        } else {
            self.to_string()
        }
    }

    /// Text form used when matching join keys
    pub fn key_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number(n) if !n.is_finite() => Ok(()),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Column-major table with named columns. Every column has `row_count` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header row and row-major data
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in &rows {
            if row.len() != columns.len() {
                return Err(StatsError::ColumnLength {
                    column: format!("row of {} cells", row.len()),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value.clone());
            }
        }

        Ok(Self {
            columns,
            rows: rows.len(),
        })
    }

    /// Builder form of `push_column`
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        self.push_column(name, values)?;
        Ok(self)
    }

    /// Append a column. The first column fixes the row count.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.columns.is_empty() {
            self.rows = values.len();
        } else if values.len() != self.rows {
            return Err(StatsError::ColumnLength {
                column: name,
                expected: self.rows,
                found: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Append a column holding the same value on every row
    pub fn push_constant(&mut self, name: impl Into<String>, value: Value) {
        let values = vec![value; self.rows];
        self.columns.push(Column {
            name: name.into(),
            values,
        });
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Column lookup that fails with `UnknownColumn`
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| StatsError::UnknownColumn(name.to_string()))
    }

    /// Cell at (row, column name)
    pub fn value(&self, row: usize, name: &str) -> Option<&Value> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    /// Rename a column in place. Returns false if `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_mut(from) {
            Some(column) => {
                column.name = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.column_index(name)?;
        Some(self.columns.remove(idx))
    }

    /// New table containing the given rows, in the given order
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: indices
                    .iter()
                    .map(|&i| c.values.get(i).cloned().unwrap_or_default())
                    .collect(),
            })
            .collect();
        Table {
            columns,
            rows: indices.len(),
        }
    }

    /// New table with only the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut table = Table::new();
        for name in names {
            let column = self.require(name)?;
            table.push_column(column.name.clone(), column.values.clone())?;
        }
        Ok(table)
    }

    /// Append all rows of `other`. Callers must ensure identical headers.
    pub(crate) fn append_rows(&mut self, other: &Table) {
        if self.columns.is_empty() {
            *self = other.clone();
            return;
        }
        for (column, incoming) in self.columns.iter_mut().zip(&other.columns) {
            column.values.extend(incoming.values.iter().cloned());
        }
        self.rows += other.rows;
    }

    /// Row indices whose text value in `name` equals `wanted`
    pub fn rows_where(&self, name: &str, wanted: &str) -> Result<Vec<usize>> {
        let column = self.require(name)?;
        Ok(column
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.key_text() == wanted)
            .map(|(i, _)| i)
            .collect())
    }

    /// Distinct text values of a column in first-seen order
    pub fn distinct(&self, name: &str) -> Result<Vec<String>> {
        let column = self.require(name)?;
        let mut seen = Vec::new();
        for value in &column.values {
            let text = value.key_text();
            if !seen.contains(&text) {
                seen.push(text);
            }
        }
        Ok(seen)
    }
}
