use crate::error::Result;
use crate::model::{Table, Value};
use rust_xlsxwriter::{ConditionalFormat3ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// One worksheet to write
#[derive(Debug, Clone, Copy)]
pub struct SheetSpec<'a> {
    pub name: &'a str,
    pub table: &'a Table,
    /// Columns shaded with a red-yellow-green scale
    pub color_scale: &'a [&'a str],
}

impl<'a> SheetSpec<'a> {
    pub fn plain(name: &'a str, table: &'a Table) -> Self {
        Self {
            name,
            table,
            color_scale: &[],
        }
    }

    pub fn percentiles(name: &'a str, table: &'a Table, metrics: &'a [&'a str]) -> Self {
        Self {
            name,
            table,
            color_scale: metrics,
        }
    }
}

/// Write tables to an Excel file, one worksheet per table
pub fn write_tables_to_xlsx(path: &Path, sheets: &[(&str, &Table)]) -> Result<()> {
    let specs: Vec<SheetSpec> = sheets
        .iter()
        .map(|(name, table)| SheetSpec::plain(name, table))
        .collect();
    write_workbook(path, &specs)
}

/// Write worksheets to an Excel file
pub fn write_workbook(path: &Path, sheets: &[SheetSpec]) -> Result<()> {
    let mut workbook = Workbook::new();

    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        write_table_sheet(worksheet, spec)?;
    }

    workbook.save(path)?;
    log::info!("Wrote {} sheets to {}", sheets.len(), path.display());
    Ok(())
}

/// Write a table to a worksheet
fn write_table_sheet(sheet: &mut Worksheet, spec: &SheetSpec) -> Result<()> {
    let table = spec.table;

    // Header format
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);

    for (col, column) in table.columns().iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, &column.name, &header_format)?;
        sheet.set_column_width(col, column.name.len().clamp(8, 40) as f64 + 2.0)?;

        for (row, value) in column.values.iter().enumerate() {
            let row = (row + 1) as u32;
            match value {
                Value::Number(n) if n.is_finite() => {
                    sheet.write_number(row, col, *n)?;
                }
                Value::Text(s) => {
                    sheet.write_string(row, col, s)?;
                }
                // Undefined cells stay blank
                _ => {}
            }
        }
    }

    sheet.set_freeze_panes(1, 0)?;

    if table.row_count() > 0 {
        let last_row = table.row_count() as u32;
        let scale = ConditionalFormat3ColorScale::new()
            .set_minimum_color("F8696B") // Red
            .set_midpoint_color("FFEB84") // Yellow
            .set_maximum_color("63BE7B"); // Green

        for name in spec.color_scale {
            if let Some(col) = table.column_index(name) {
                let col = col as u16;
                sheet.add_conditional_format(1, col, last_row, col, &scale)?;
            }
        }
    }

    sheet.set_name(spec.name)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PLAYER;
    use crate::sheets::read_sheet;

    fn sample() -> Table {
        Table::new()
            .with_column(PLAYER, vec!["A".into(), "B".into(), "C".into()])
            .unwrap()
            .with_column("Goals Scored", vec![5.0.into(), Value::Missing, 0.25.into()])
            .unwrap()
    }

    #[test]
    fn test_written_workbook_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let table = sample();

        write_tables_to_xlsx(&path, &[("Raw", &table), ("Per 90", &table)]).unwrap();

        let back = read_sheet(&path, "Per 90").unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_percentile_sheet_with_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pct.xlsx");
        let table = sample();
        let metrics = ["Goals Scored", "Not There"];

        write_workbook(&path, &[SheetSpec::percentiles("Percentiles", &table, &metrics)]).unwrap();
        assert_eq!(read_sheet(&path, "Percentiles").unwrap().row_count(), 3);
    }
}
