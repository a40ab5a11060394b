use crate::error::{Result, StatsError};
use crate::model::{Table, Value};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Read one worksheet. The first row is the header; repeated header names
/// are suffixed `.1`, `.2`, ...
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(StatsError::Sheet(format!(
            "{} has no sheet named '{}'",
            path.display(),
            sheet
        )));
    }
    let range = workbook.worksheet_range(sheet)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(header_text).collect(),
        None => return Ok(Table::new()),
    };
    let data: Vec<Vec<Value>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    log::debug!(
        "Read {} rows from {} [{}]",
        data.len(),
        path.display(),
        sheet
    );
    super::table_from_cells(headers, data)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Missing,
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) => Value::Number(*f),
        Data::String(s) => Value::parse(s),
        Data::Bool(b) => Value::Text(b.to_string()),
        other => Value::parse(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_coercion() {
        assert_eq!(cell_value(&Data::Empty), Value::Missing);
        assert_eq!(cell_value(&Data::Int(7)), Value::Number(7.0));
        assert_eq!(cell_value(&Data::Float(0.5)), Value::Number(0.5));
        assert_eq!(cell_value(&Data::String("1,024".to_string())), Value::Number(1024.0));
        assert_eq!(cell_value(&Data::String("FW,MF".to_string())), Value::Text("FW,MF".to_string()));
        assert_eq!(cell_value(&Data::String("  ".to_string())), Value::Missing);
    }

    #[test]
    fn test_header_text() {
        assert_eq!(header_text(&Data::String(" Gls ".to_string())), "Gls");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn test_missing_workbook_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_sheet(&dir.path().join("nope.xlsx"), "raw").is_err());
    }
}
