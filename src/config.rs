// WHY: analyzer configuration - normalization rules, empty-sentence policy and read mode
// Every field has a default, so a TOML file only needs the keys it overrides

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Characters removed from sentences when `strip_non_alphanumeric` is on
pub const DEFAULT_STRIP_PATTERN: &str = r"[^a-zA-Z0-9\s]";

/// What happens to fragments that normalize to the empty string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptySentencePolicy {
    /// Keep empty sentences so positions match the period-delimited fragments
    #[default]
    Keep,
    /// Drop empty sentences; later sentences shift down to close the gap
    Drop,
}

/// How document bytes are brought into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// Plain buffered read of the whole file
    #[default]
    Buffered,
    /// Memory-mapped read
    Mmap,
}

/// Configuration for loading, splitting and normalizing a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Replace every match of `strip_pattern` with a space
    pub strip_non_alphanumeric: bool,
    /// Regex describing the characters to strip
    pub strip_pattern: String,
    /// Lowercase sentences and stop words alike
    pub lowercase: bool,
    /// Keep or drop sentences that normalize to ""
    pub empty_sentences: EmptySentencePolicy,
    /// Buffered or memory-mapped document reads
    pub read_mode: ReadMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            strip_non_alphanumeric: true,
            strip_pattern: DEFAULT_STRIP_PATTERN.to_string(),
            lowercase: false,
            empty_sentences: EmptySentencePolicy::Keep,
            read_mode: ReadMode::Buffered,
        }
    }
}

impl AnalyzerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Strip pattern to compile, or `None` when stripping is disabled
    pub fn active_strip_pattern(&self) -> Option<&str> {
        self.strip_non_alphanumeric
            .then_some(self.strip_pattern.as_str())
    }
}
