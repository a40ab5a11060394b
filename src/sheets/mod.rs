//! Reading category sheets from workbooks and csv exports

pub mod delimited;
pub mod workbook;

use crate::error::Result;
use crate::model::{Table, Value};
use std::collections::HashSet;
use std::path::Path;

pub use delimited::{read_csv, write_table_csv};
pub use workbook::read_sheet;

/// Make repeated headers unique: the first occurrence keeps its name, later
/// ones become `name.1`, `name.2`, ...
pub fn mangle_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for header in raw {
        let mut name = header.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{}.{}", header, n);
            n += 1;
        }
        used.insert(name.clone());
        headers.push(name);
    }
    headers
}

/// Build a table from raw header and row cells, padding short rows with
/// missing cells and ignoring cells beyond the header
pub(crate) fn table_from_cells(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Table> {
    let headers = mangle_headers(headers);
    let width = headers.len();
    let rows = rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, Value::Missing);
            row
        })
        .collect();
    Table::from_rows(headers, rows)
}

/// Read one sheet of a category workbook, or its csv export when the
/// workbook does not exist
pub fn read_table(workbook_path: &Path, sheet: &str) -> Result<Table> {
    if workbook_path.exists() {
        return read_sheet(workbook_path, sheet);
    }
    read_csv(&csv_path(workbook_path, sheet))
}

/// `dir/pl_standard.xlsx` + `per_90` -> `dir/pl_standard_per_90.csv`
pub fn csv_path(workbook_path: &Path, sheet: &str) -> std::path::PathBuf {
    let stem = workbook_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");
    workbook_path.with_file_name(format!("{}_{}.csv", stem, sheet))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mangle_repeated_headers() {
        let headers = mangle_headers(strings(&["Player", "Cmp", "Att", "Cmp", "Att", "Cmp"]));
        assert_eq!(headers, strings(&["Player", "Cmp", "Att", "Cmp.1", "Att.1", "Cmp.2"]));
    }

    #[test]
    fn test_mangle_avoids_existing_suffix() {
        let headers = mangle_headers(strings(&["Tkl", "Tkl.1", "Tkl"]));
        assert_eq!(headers, strings(&["Tkl", "Tkl.1", "Tkl.2"]));
    }

    #[test]
    fn test_rows_padded_to_header() {
        let table = table_from_cells(
            strings(&["a", "b", "c"]),
            vec![vec![Value::Number(1.0)], vec![1.0.into(), 2.0.into(), 3.0.into(), 4.0.into()]],
        )
        .unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(table.value(0, "c").unwrap().is_undefined());
        assert_eq!(table.value(1, "c").unwrap().as_number(), Some(3.0));
    }

    #[test]
    fn test_csv_path() {
        let p = csv_path(Path::new("data/pl_standard.xlsx"), "per_90");
        assert_eq!(p, Path::new("data/pl_standard_per_90.csv"));
    }
}
