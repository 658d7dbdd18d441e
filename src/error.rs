//! Error types for loading, persisting and configuring reports.
//!
//! Aggregation itself never fails; only the file-facing edges return these.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Source file extension is neither `.json` nor `.csv`
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
