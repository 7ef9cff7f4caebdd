use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duckdb error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    #[error("unexpected value in column {column}: {value}")]
    UnexpectedValue { column: &'static str, value: String },

    #[error("timestamp {0} is outside the storable range")]
    TimestampOutOfRange(f64),
}
