use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid file path: {0}")]
    InvalidPath(PathBuf),

    #[error("Invalid applies_to pattern '{0}': {1}")]
    InvalidPattern(String, String),

    #[error("Malformed configuration document {0}: {1}")]
    MalformedDocument(PathBuf, String),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
