//! Pipeline error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Error kinds of the data-quality contract
///
/// Every stage-local failure aborts that stage and propagates unchanged to
/// the orchestrator; no stage retries internally.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Unparsable row, date, or response body
    #[error("format error: {0}")]
    Format(String),

    /// Network or timeout failure talking to the product API
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Product API answered with a non-2xx status
    #[error("API returned HTTP {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// A field could not be coerced to its canonical type
    #[error("type error: {0}")]
    Type(String),

    /// One or both validators produced a false verdict
    #[error("validation failed with {} issue(s)", .issues.len())]
    ValidationFailed { issues: Vec<String> },

    /// Database could not be reached; nothing was written
    #[error("database unreachable: {0}")]
    Connection(#[source] sqlx::Error),

    /// Database write failed; the batch was rolled back
    #[error("database load failed: {0}")]
    Load(#[source] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Format(err.to_string())
    }
}
