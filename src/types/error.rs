use thiserror::Error;

/// userstats error types
#[derive(Error, Debug)]
pub enum UserStatsError {
    /// Failed to decode a payload
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode summaries for output
    #[error("encode error: {0}")]
    Encode(String),

    /// Record fetch failed (network, HTTP status)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for userstats
pub type Result<T> = std::result::Result<T, UserStatsError>;
