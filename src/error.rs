use thiserror::Error;

use crate::model::Category;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("{category} table is missing expected column '{column}'")]
    MissingColumn { category: Category, column: String },

    #[error("Schema mismatch for league '{league}': {detail}")]
    SchemaMismatch { league: String, detail: String },

    #[error("Analytic column '{0}' is not produced by the merge")]
    SelectorDrift(String),

    #[error("Column '{column}' has non-numeric value '{value}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unknown radar template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Column '{column}' has {found} values, table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("No league tables to aggregate")]
    NoLeagues,

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook read error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, StatsError>;
