// WHY: one error type for every library failure; load failures abort construction

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Main error type for docstats operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// File missing or unreadable
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Word was never seen in the document
    #[error("word not found in document: {0}")]
    NotFound(String),

    /// Strip pattern failed to compile
    #[error("invalid strip pattern: {0}")]
    Pattern(#[from] regex_automata::meta::BuildError),

    /// Configuration file failed to parse
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the load-time failures (missing, unreadable or undecodable input)
    pub fn is_io(&self) -> bool {
        matches!(self, AnalysisError::Io { .. } | AnalysisError::Decode { .. })
    }
}
