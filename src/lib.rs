pub mod analytics;
pub mod config;
pub mod error;
pub mod loader;
pub mod splitter;

// Re-export main types for convenient access
pub use analytics::{
    AnalysisSummary, DocReport, DocumentAnalyzer,
    FirstWordGroups, WordIndex
};

pub use config::{AnalyzerConfig, EmptySentencePolicy, ReadMode};
pub use error::{AnalysisError, Result};

// Re-export loader and splitter stages for callers composing the pipeline by hand
pub use loader::{
    load_document, load_stop_words, load_stop_words_async,
    read_document, read_document_async, NormalizedText, StopWordSet
};
pub use splitter::{Normalizer, Sentence, SentenceSplitter};
