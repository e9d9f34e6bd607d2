// WHY: the only module that touches the filesystem; everything downstream is pure
// Both loads happen once, up front, and any failure aborts construction

use memmap2::Mmap;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ReadMode;
use crate::error::{AnalysisError, Result};
use crate::splitter::Normalizer;

/// Whole-document text after normalization.
///
/// Contains no newline, no run of two or more spaces, and no leading or trailing space.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Normalize `raw` with the given rules
    pub fn from_raw(raw: &str, normalizer: &Normalizer) -> Self {
        Self(normalizer.normalize(raw))
    }

    /// Join already-normalized pieces with single spaces, skipping empty ones
    pub fn join<'a, I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let joined = pieces
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Distinct whitespace tokens, in first-seen order
    pub fn distinct_words(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.0
            .split_whitespace()
            .filter(|word| seen.insert(*word))
            .collect()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stop words, one per line of the source file; used only for membership tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// Split on `\n` or `\r\n` and keep every line verbatim
    pub fn parse(content: &str) -> Self {
        content.lines().collect()
    }

    /// Exact, case-sensitive membership
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Lowercased copy, for use with a lowercasing normalizer
    pub fn lowercased(&self) -> Self {
        self.words.iter().map(|w| w.to_lowercase()).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for StopWordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn decode<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|source| {
        warn!("UTF-8 validation failed: {}", path.display());
        AnalysisError::Decode {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn read_buffered(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        warn!("Failed to read {}: {}", path.display(), e);
        AnalysisError::io(path, e)
    })?;
    decode(path, &bytes).map(str::to_owned)
}

fn read_mmap(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let len = file
        .metadata()
        .map_err(|e| AnalysisError::io(path, e))?
        .len();
    // zero-length files cannot be mapped on every platform
    if len == 0 {
        return Ok(String::new());
    }
    // SAFETY: the mapping is read-only and copied into an owned String before it is dropped
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| AnalysisError::io(path, e))?;
    decode(path, &mmap).map(str::to_owned)
}

/// Read and decode the raw document text
pub fn read_document<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<String> {
    let path = path.as_ref();
    debug!("Reading document {} ({:?})", path.display(), mode);

    let content = match mode {
        ReadMode::Buffered => read_buffered(path)?,
        ReadMode::Mmap => read_mmap(path)?,
    };

    info!("Read document {}: {} bytes", path.display(), content.len());
    Ok(content)
}

/// Read and decode the raw document text (async version)
pub async fn read_document_async<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<String> {
    let path = path.as_ref().to_path_buf();
    match mode {
        ReadMode::Buffered => {
            debug!("Reading document {} (async)", path.display());
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| AnalysisError::io(&path, e))?;
            let content = decode(&path, &bytes)?.to_owned();
            info!("Read document {}: {} bytes", path.display(), content.len());
            Ok(content)
        }
        ReadMode::Mmap => {
            let blocking_path = path.clone();
            tokio::task::spawn_blocking(move || read_document(blocking_path, ReadMode::Mmap))
                .await
                .map_err(|e| AnalysisError::io(&path, std::io::Error::other(e)))?
        }
    }
}

/// Read a document and normalize it as a whole
pub fn load_document<P: AsRef<Path>>(
    path: P,
    mode: ReadMode,
    normalizer: &Normalizer,
) -> Result<NormalizedText> {
    let raw = read_document(path, mode)?;
    Ok(NormalizedText::from_raw(&raw, normalizer))
}

/// Read a stop-word list, one word per line
pub fn load_stop_words<P: AsRef<Path>>(path: P) -> Result<StopWordSet> {
    let path = path.as_ref();
    let content = read_buffered(path)?;
    let stop_words = StopWordSet::parse(&content);
    info!("Loaded {} stop words from {}", stop_words.len(), path.display());
    Ok(stop_words)
}

/// Read a stop-word list, one word per line (async version)
pub async fn load_stop_words_async<P: AsRef<Path>>(path: P) -> Result<StopWordSet> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AnalysisError::io(path, e))?;
    let stop_words = StopWordSet::parse(decode(path, &bytes)?);
    info!("Loaded {} stop words from {}", stop_words.len(), path.display());
    Ok(stop_words)
}
