use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("malformed record at line {line}: expected 6 fields, found {fields}")]
    MalformedRecord { line: u64, fields: usize },

    #[error("invalid sample size: requested {requested} but only {available} records available")]
    InvalidSampleSize { requested: usize, available: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
