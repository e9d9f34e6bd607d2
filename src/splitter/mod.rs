// WHY: purely lexical splitter - every '.' is a boundary, no abbreviation or decimal handling
// Positions are the unit of "occurrence" for the analytics engine, so indexing is decided here

use serde::Serialize;
use tracing::debug;

use crate::config::{AnalyzerConfig, EmptySentencePolicy};
use crate::error::Result;

pub mod normalization;

pub use normalization::Normalizer;

/// Sentence boundary character
pub const SENTENCE_DELIMITER: char = '.';

/// A normalized, period-delimited fragment and its ordinal position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whitespace-delimited words, left to right
    pub fn words(&self) -> std::str::SplitWhitespace<'_> {
        self.text.split_whitespace()
    }

    /// Number of whitespace-delimited words; 0 for an empty sentence
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn first_word(&self) -> Option<&str> {
        self.words().next()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Splits text on '.' and normalizes each fragment
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    normalizer: Normalizer,
    empty_sentences: EmptySentencePolicy,
}

impl SentenceSplitter {
    /// Create a splitter from the analyzer configuration
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new(config)?,
            empty_sentences: config.empty_sentences,
        })
    }

    /// Create a splitter with the default configuration
    pub fn with_default_rules() -> Result<Self> {
        Self::new(&AnalyzerConfig::default())
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn empty_sentence_policy(&self) -> EmptySentencePolicy {
        self.empty_sentences
    }

    /// Split `text` into ordered, normalized sentences.
    ///
    /// Interior empty sentences are kept (or dropped, per policy). Trailing
    /// sentences that normalize to `""` are discarded, but at least one sentence
    /// always remains, so `""` yields a single empty sentence.
    pub fn split(&self, text: &str) -> Vec<Sentence> {
        let mut normalized: Vec<String> = text
            .split(SENTENCE_DELIMITER)
            .map(|fragment| self.normalizer.normalize(fragment))
            .collect();
        trim_trailing_empty(&mut normalized);

        let sentences: Vec<Sentence> = normalized
            .into_iter()
            .filter(|s| !(s.is_empty() && self.empty_sentences == EmptySentencePolicy::Drop))
            .enumerate()
            .map(|(index, s)| Sentence::new(index, s))
            .collect();

        debug!(
            "Split {} bytes into {} sentences ({:?} empty policy)",
            text.len(),
            sentences.len(),
            self.empty_sentences
        );
        sentences
    }
}

/// Pop trailing empty sentences, never going below one.
/// The last sentence is then non-empty unless it is the only one, so joining
/// the output with '.' and splitting again reproduces it.
fn trim_trailing_empty(normalized: &mut Vec<String>) {
    while normalized.len() > 1 && normalized.last().is_some_and(|s| s.is_empty()) {
        normalized.pop();
    }
}
