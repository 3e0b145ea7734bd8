// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AglaError>;

#[derive(Error, Debug)]
pub enum AglaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AglaError {
    /// True when the caller sent something we cannot act on, as opposed to a
    /// fault in the corpus, configuration or host.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::Validation(_))
    }

    /// HTTP-style status code for the JSON envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnknownTool(_) => 404,
            _ if self.is_client_error() => 400,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for AglaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_400() {
        assert_eq!(AglaError::InvalidRequest("x".into()).status_code(), 400);
        assert_eq!(AglaError::Validation("x".into()).status_code(), 400);
        assert_eq!(AglaError::Corpus("x".into()).status_code(), 500);
        assert!(!AglaError::Config("x".into()).is_client_error());
        assert_eq!(AglaError::UnknownTool("x".into()).status_code(), 404);
    }
}
