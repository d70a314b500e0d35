//! Custom error types for the watchlist service
//!
//! Provides structured, typed errors instead of generic Box<dyn Error>

use thiserror::Error;

/// Top-level application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Market data error: {0}")]
    Provider(#[from] ProviderError),
}

/// Upstream market-data provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("Authentication failed: {reason}")]
    AuthFailed { reason: String },

    #[error("Unexpected response format: {0}")]
    ResponseFormat(String),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Config(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<url::ParseError> for ProviderError {
    fn from(err: url::ParseError) -> Self {
        ProviderError::ResponseFormat(format!("invalid provider URL: {}", err))
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
