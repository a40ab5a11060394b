use crate::error::Result;
use crate::model::{Table, Value};
use std::path::Path;

/// Read a csv export of a sheet. Rows may be ragged; short rows are padded
/// with missing cells.
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Value::parse).collect());
    }

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    super::table_from_cells(headers, rows)
}

/// Write a table as csv: header row, then one record per row with undefined
/// cells left empty
pub fn write_table_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.headers())?;
    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.values[row].to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::duplicate_keys;
    use crate::model::{PLAYER, SQUAD};
    use std::fs;

    #[test]
    fn test_read_mangles_and_coerces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pl_passing_raw.csv");
        fs::write(
            &path,
            "Player,Cmp,Att,Cmp,Att\nA,\"1,200\",1500,300,\nB,10,20\n",
        )
        .unwrap();

        let table = read_csv(&path).unwrap();
        assert_eq!(table.headers(), vec![PLAYER, "Cmp", "Att", "Cmp.1", "Att.1"]);
        assert_eq!(table.value(0, "Cmp").unwrap().as_number(), Some(1200.0));
        assert!(table.value(0, "Att.1").unwrap().is_undefined());
        assert!(table.value(1, "Cmp.1").unwrap().is_undefined());
    }

    #[test]
    fn test_player_named_like_a_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pl_standard_raw.csv");
        fs::write(&path, "Player,Squad,Gls\nNan,Inf,1\nA,S,2\n").unwrap();

        let table = read_csv(&path).unwrap();
        assert_eq!(table.value(0, PLAYER), Some(&Value::Text("Nan".to_string())));
        assert_eq!(table.value(0, SQUAD), Some(&Value::Text("Inf".to_string())));
        assert_eq!(table.rows_where(PLAYER, "Nan").unwrap(), vec![0]);
        assert!(duplicate_keys(&table).unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = Table::new()
            .with_column(PLAYER, vec!["A".into(), "B".into()])
            .unwrap()
            .with_column("Goals Scored", vec![5.0.into(), Value::Number(f64::NAN)])
            .unwrap();

        write_table_csv(&path, &table).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Player,Goals Scored\nA,5\nB,\n");

        let back = read_csv(&path).unwrap();
        assert_eq!(back.value(0, "Goals Scored"), Some(&Value::Number(5.0)));
        assert!(back.value(1, "Goals Scored").unwrap().is_undefined());
    }
}
