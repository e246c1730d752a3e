//! Error types

use thiserror::Error;

/// Main error type for Octoboard
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited { retry_after: u64 },

    #[error("Bad credentials")]
    Unauthorized,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
