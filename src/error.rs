use std::io;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, EnrichError>;

/// Failures talking to the people-search API.
#[derive(Debug, Error)]
pub enum ApolloError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Out of enrichment credits")]
    OutOfCredits,

    #[error("Rate limited by the API")]
    RateLimited,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,
}

impl From<reqwest::Error> for ApolloError {
    fn from(err: reqwest::Error) -> Self {
        ApolloError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApolloError {
    fn from(err: serde_json::Error) -> Self {
        ApolloError::Parse(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Input has no company name column")]
    MissingNameColumn,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApolloError),
}
