use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadSitesError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read site file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse site CSV data")]
    CsvParse(#[source] PolarsError),

    #[error("Required column '{0}' not found in site data")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// No reference row matches the selector triple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No coordinates found for RSTCD: {region}, LOCCD: {location}, PLACD: {plot}")]
pub struct ResolveError {
    pub region: String,
    pub location: String,
    pub plot: String,
}
