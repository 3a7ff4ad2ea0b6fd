use thiserror::Error;

/// The single provider request failed before a usable JSON body was received.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response from {0} is not valid JSON")]
    InvalidJson(String, #[source] reqwest::Error),
}

/// The provider answered, but not with the expected response layout.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Response does not match the expected layout")]
    UnexpectedShape(#[source] serde_json::Error),

    #[error("Response contains no result set")]
    NoResultSet,

    #[error("Response contains no time intervals")]
    MissingTimestamps,

    #[error("Response contains no daily values")]
    MissingValues,

    #[error("Response has {timestamps} timestamps but {values} values")]
    LengthMismatch { timestamps: usize, values: usize },

    #[error("Cannot read a date from timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("No value reported for timestamp '{0}'")]
    MissingValue(String),
}
