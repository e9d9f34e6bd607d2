// WHY: normalization is shared by the splitter (per sentence) and the loader (whole document)
// Single pass over the text; strip-pattern matches are fed through the same whitespace collapse

use regex_automata::meta::Regex;

use crate::config::AnalyzerConfig;
use crate::error::Result;

/// Applies the normalization rules: line breaks become spaces, strip-pattern
/// matches become spaces, whitespace runs collapse to one space, ends are trimmed.
///
/// Output never contains a newline, a run of two spaces, or a leading/trailing space.
#[derive(Debug, Clone)]
pub struct Normalizer {
    strip: Option<Regex>,
    lowercase: bool,
}

impl Normalizer {
    /// Build a normalizer from the analyzer configuration
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let strip = match config.active_strip_pattern() {
            Some(pattern) => Some(Regex::new(pattern)?),
            None => None,
        };
        Ok(Self {
            strip,
            lowercase: config.lowercase,
        })
    }

    /// Whitespace-only normalizer: no stripping, no case folding
    pub fn whitespace_only() -> Self {
        Self {
            strip: None,
            lowercase: false,
        }
    }

    pub fn lowercases(&self) -> bool {
        self.lowercase
    }

    /// Normalize with a new allocation
    pub fn normalize(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        self.normalize_into(text, &mut result);
        result
    }

    /// Normalize into a supplied buffer, clearing it first
    pub fn normalize_into(&self, text: &str, buffer: &mut String) {
        buffer.clear();
        buffer.reserve(text.len());

        // starts true so a leading run is never written
        let mut prev_was_space = true;

        match &self.strip {
            Some(regex) => {
                let mut last = 0;
                for mat in regex.find_iter(text) {
                    if mat.start() == mat.end() {
                        continue;
                    }
                    push_collapsed(&text[last..mat.start()], buffer, &mut prev_was_space);
                    push_space(buffer, &mut prev_was_space);
                    last = mat.end();
                }
                push_collapsed(&text[last..], buffer, &mut prev_was_space);
            }
            None => push_collapsed(text, buffer, &mut prev_was_space),
        }

        // at most one trailing space survives the collapse
        if buffer.ends_with(' ') {
            buffer.pop();
        }

        if self.lowercase && buffer.chars().any(char::is_uppercase) {
            let lowered = buffer.to_lowercase();
            buffer.clear();
            buffer.push_str(&lowered);
        }
    }
}

fn push_space(buffer: &mut String, prev_was_space: &mut bool) {
    if !*prev_was_space {
        buffer.push(' ');
        *prev_was_space = true;
    }
}

fn push_collapsed(text: &str, buffer: &mut String, prev_was_space: &mut bool) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            // covers \n, \r\n, tabs and runs of spaces alike
            push_space(buffer, prev_was_space);
        } else {
            buffer.push(ch);
            *prev_was_space = false;
        }
    }
}
