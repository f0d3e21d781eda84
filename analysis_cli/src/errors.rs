use permitatlas::prelude::PermitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("PermitError: {0}")]
    PermitError(#[from] PermitError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error while parsing: {0}")]
    ParsingError(String),
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
