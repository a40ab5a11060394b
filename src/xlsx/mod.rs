pub mod writer;

pub use writer::write_tables_to_xlsx;
pub use writer::write_workbook;
pub use writer::SheetSpec;
