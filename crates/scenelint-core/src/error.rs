//! Error types for scenelint

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for scenelint operations
#[derive(Debug, Error)]
pub enum SceneLintError {
    #[error("Scene file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    SceneParse(String),

    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigParse(String),

    #[error("Unknown naming convention: '{0}'")]
    UnknownNamingConvention(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl SceneLintError {
    /// Build an `UnsupportedFormat` error from a raw extension (with or without a dot)
    pub fn unsupported(extension: impl AsRef<str>) -> Self {
        let ext = extension.as_ref().trim_start_matches('.');
        SceneLintError::UnsupportedFormat {
            extension: if ext.is_empty() {
                String::new()
            } else {
                format!(".{}", ext.to_lowercase())
            },
        }
    }
}

/// Result type alias for scenelint operations
pub type Result<T> = std::result::Result<T, SceneLintError>;

impl From<toml::de::Error> for SceneLintError {
    fn from(err: toml::de::Error) -> Self {
        SceneLintError::ConfigParse(err.to_string())
    }
}

impl From<serde_yaml::Error> for SceneLintError {
    fn from(err: serde_yaml::Error) -> Self {
        SceneLintError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for SceneLintError {
    fn from(err: serde_json::Error) -> Self {
        SceneLintError::ConfigParse(err.to_string())
    }
}
