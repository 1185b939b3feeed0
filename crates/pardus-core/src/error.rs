//! Error Types

use thiserror::Error;

/// Result type alias for pardus operations
pub type Result<T> = std::result::Result<T, PardusError>;

/// Pardus error types
#[derive(Error, Debug)]
pub enum PardusError {
    /// Missing or unusable configuration at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// A declared tool parameter carries no type annotation
    #[error("Tool '{tool}': parameter '{param}' has no type annotation")]
    MissingAnnotation { tool: String, param: String },

    /// Network unreachable or the request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("Backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for PardusError {
    fn from(err: anyhow::Error) -> Self {
        PardusError::Other(err.to_string())
    }
}
