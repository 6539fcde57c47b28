use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller named a strategy type that is not in the template catalog.
    /// Maps to a 4xx at the API boundary — never raised for snapshot data.
    #[error("Unknown strategy type: '{0}'")]
    UnknownStrategyType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
