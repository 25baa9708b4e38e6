// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirviewError {
    /// An exclusion pattern could not be compiled. Fatal: no traversal runs
    /// with a partially compiled matcher.
    #[error("invalid exclude pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("root directory not found: {0:?}")]
    RootNotFound(PathBuf),

    #[error("root is not a directory: {0:?}")]
    RootNotDirectory(PathBuf),

    /// A directory could not be listed during traversal.
    #[error("cannot read directory {path:?}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DirviewError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        DirviewError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirviewError>;
