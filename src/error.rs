use thiserror::Error;

/// Errors that can occur while generating or storing recipes
#[derive(Error, Debug)]
pub enum RecipifyError {
    /// Failed to reach the upstream model API or backend
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The upstream provider answered but the call did not succeed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// The ingredient query is unusable (e.g. blank)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Reading or writing the recipe history failed
    #[error("Store error: {0}")]
    StoreError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, RecipifyError>;
