// WHY: analytics over a split document - owns an immutable sentence sequence and stop-word set
// Every query recomputes from those two inputs; nothing is cached between calls

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::error::{AnalysisError, Result};
use crate::loader::{self, NormalizedText, StopWordSet};
use crate::splitter::{Sentence, SentenceSplitter};

/// Word -> ascending sentence positions, one entry per occurrence
pub type WordIndex = BTreeMap<String, Vec<usize>>;

/// Word -> full sentences whose first word it is, in sentence order
pub type FirstWordGroups = BTreeMap<String, Vec<String>>;

/// Query engine over one loaded document
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer {
    sentences: Vec<Sentence>,
    stop_words: StopWordSet,
}

impl DocumentAnalyzer {
    /// Build from already-split sentences and a stop-word set.
    ///
    /// Sentences are renumbered by their position in `sentences`; incoming indices are ignored.
    pub fn new(sentences: Vec<Sentence>, stop_words: StopWordSet) -> Self {
        let sentences = sentences
            .into_iter()
            .enumerate()
            .map(|(index, sentence)| Sentence::new(index, sentence.text))
            .collect();
        Self {
            sentences,
            stop_words,
        }
    }

    /// Split `text` and pair it with `stop_words`.
    ///
    /// A lowercasing splitter lowercases the stop words too, so matching stays symmetric.
    pub fn from_text(text: &str, stop_words: StopWordSet, splitter: &SentenceSplitter) -> Self {
        let stop_words = if splitter.normalizer().lowercases() {
            stop_words.lowercased()
        } else {
            stop_words
        };
        Self::new(splitter.split(text), stop_words)
    }

    /// Load both files and split the document. Fails if either load fails.
    pub fn load<P, Q>(document: P, stop_words: Q, config: &AnalyzerConfig) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let splitter = SentenceSplitter::new(config)?;
        let text = loader::read_document(document, config.read_mode)?;
        let stop_words = loader::load_stop_words(stop_words)?;
        let analyzer = Self::from_text(&text, stop_words, &splitter);
        analyzer.log_loaded();
        Ok(analyzer)
    }

    /// Load both files and split the document (async version)
    pub async fn load_async<P, Q>(
        document: P,
        stop_words: Q,
        config: &AnalyzerConfig,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let splitter = SentenceSplitter::new(config)?;
        let text = loader::read_document_async(document, config.read_mode).await?;
        let stop_words = loader::load_stop_words_async(stop_words).await?;
        let analyzer = Self::from_text(&text, stop_words, &splitter);
        analyzer.log_loaded();
        Ok(analyzer)
    }

    fn log_loaded(&self) {
        info!(
            "Analyzer ready: {} sentences, {} stop words",
            self.sentences.len(),
            self.stop_words.len()
        );
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Whole-document text: non-empty sentences joined by single spaces
    pub fn normalized_text(&self) -> NormalizedText {
        NormalizedText::join(self.sentences.iter().map(Sentence::as_str))
    }

    /// Per-sentence word counts, in sentence order
    pub fn word_counts(&self) -> Vec<usize> {
        self.sentences.iter().map(Sentence::word_count).collect()
    }

    /// Sentences with stop words removed. Sentence count and order are unchanged.
    pub fn without_stop_words(&self) -> Vec<Sentence> {
        self.sentences
            .iter()
            .map(|sentence| {
                let kept = sentence
                    .words()
                    .filter(|word| !self.stop_words.contains(word))
                    .collect::<Vec<_>>()
                    .join(" ");
                Sentence::new(sentence.index, kept)
            })
            .collect()
    }

    /// Every distinct word mapped to the positions of the sentences it occurs in.
    ///
    /// Stop words are indexed. A word appearing twice in one sentence records
    /// that position twice.
    pub fn word_occurrence_index(&self) -> WordIndex {
        let normalized = self.normalized_text();

        // pass 1: key set
        let mut index: WordIndex = normalized
            .distinct_words()
            .into_iter()
            .map(|word| (word.to_string(), Vec::new()))
            .collect();

        // pass 2: fold positions in ascending order
        for sentence in &self.sentences {
            for word in sentence.words() {
                if let Some(positions) = index.get_mut(word) {
                    positions.push(sentence.index);
                }
            }
        }

        debug!("Built occurrence index over {} distinct words", index.len());
        index
    }

    /// Number of recorded occurrences of `word`; `NotFound` if it was never seen
    pub fn occurrence_count(&self, word: &str) -> Result<usize> {
        self.word_occurrence_index()
            .get(word)
            .map(Vec::len)
            .ok_or_else(|| AnalysisError::NotFound(word.to_string()))
    }

    /// Every distinct word mapped to the full sentences that start with it
    pub fn first_word_groups(&self) -> FirstWordGroups {
        let normalized = self.normalized_text();

        let mut groups: FirstWordGroups = normalized
            .distinct_words()
            .into_iter()
            .map(|word| (word.to_string(), Vec::new()))
            .collect();

        for sentence in &self.sentences {
            let Some(first) = sentence.first_word() else {
                continue;
            };
            if let Some(group) = groups.get_mut(first) {
                group.push(sentence.text.clone());
            }
        }

        groups
    }

    /// Mean words per sentence; 0.0 with no sentences
    pub fn average_sentence_length(&self) -> f64 {
        mean(self.sentences.iter().map(Sentence::word_count))
    }

    /// Mean characters per sentence; 0.0 with no sentences
    pub fn average_sentence_chars(&self) -> f64 {
        mean(self.sentences.iter().map(Sentence::char_count))
    }

    /// Sum of word counts, each negated when odd
    pub fn parity_weighted_sum(&self) -> i64 {
        self.sentences
            .iter()
            .map(|sentence| {
                let count = sentence.word_count() as i64;
                if count % 2 == 0 {
                    count
                } else {
                    -count
                }
            })
            .sum()
    }

    /// Sentence count and post-filter word counts
    pub fn describe(&self) -> DocReport {
        let words_per_sentence: Vec<usize> = self
            .without_stop_words()
            .iter()
            .map(Sentence::word_count)
            .collect();
        let total_words = words_per_sentence.iter().sum();

        DocReport {
            sentence_count: self.sentences.len(),
            words_per_sentence,
            total_words,
        }
    }

    /// Every derived view in one serializable bundle
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            report: self.describe(),
            sentences: self.sentences.iter().map(|s| s.text.clone()).collect(),
            without_stop_words: self
                .without_stop_words()
                .into_iter()
                .map(|s| s.text)
                .collect(),
            word_counts: self.word_counts(),
            word_index: self.word_occurrence_index(),
            first_word_groups: self.first_word_groups(),
            average_sentence_length: self.average_sentence_length(),
            average_sentence_chars: self.average_sentence_chars(),
            parity_weighted_sum: self.parity_weighted_sum(),
        }
    }
}

fn mean(values: impl Iterator<Item = usize>) -> f64 {
    let (count, sum) = values.fold((0usize, 0usize), |(n, s), v| (n + 1, s + v));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Human-readable document summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocReport {
    pub sentence_count: usize,
    /// Word counts after stop-word removal
    pub words_per_sentence: Vec<usize>,
    pub total_words: usize,
}

impl fmt::Display for DocReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "all sentences: {}", self.sentence_count)?;
        writeln!(f, "sentence words without stop words:")?;
        writeln!(f, "{:?}", self.words_per_sentence)?;
        write!(f, "all sentence words without stop words: {}", self.total_words)
    }
}

/// Full analysis output, as written by `--json` and `--stats-out`
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub report: DocReport,
    pub sentences: Vec<String>,
    pub without_stop_words: Vec<String>,
    pub word_counts: Vec<usize>,
    pub word_index: WordIndex,
    pub first_word_groups: FirstWordGroups,
    pub average_sentence_length: f64,
    pub average_sentence_chars: f64,
    pub parity_weighted_sum: i64,
}
