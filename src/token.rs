//! Sub-word tokens as produced by an ASR backend, and their grouping into words.

use serde::Serialize;

use crate::segments::Word;

/// A single token produced by an ASR backend.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Token {
    /// Start time in seconds (whisper returns centiseconds).
    pub start_seconds: f64,
    /// End time in seconds (whisper returns centiseconds).
    pub end_seconds: f64,
    /// Token text. A leading space marks the start of a new word.
    pub text: String,
    /// Probability assigned to this token.
    pub probability: f32,
}

impl Token {
    /// Whisper control tokens such as `[_BEG_]`, `[_TT_50]` or `<|endoftext|>`.
    pub fn is_special(&self) -> bool {
        let t = self.text.as_str();
        (t.starts_with("[_") && t.ends_with("_]")) || (t.starts_with("<|") && t.ends_with("|>"))
    }
}

#[cfg_attr(not(feature = "whisper"), allow(dead_code))]
pub(crate) fn centiseconds_to_seconds(value: i64) -> f64 {
    if value < 0 { 0.0 } else { value as f64 / 100.0 }
}

/// Merge sub-word tokens into timed words.
///
/// A token starting with whitespace opens a new word; any other token (word pieces,
/// punctuation) extends the current one. Special tokens are dropped and words that end up blank
/// are skipped.
pub fn tokens_to_words(tokens: &[Token]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Vec<&Token> = Vec::new();

    for token in tokens.iter().filter(|t| !t.is_special()) {
        let starts_word = token.text.starts_with(char::is_whitespace);
        if starts_word && !current.is_empty() {
            words.extend(finalize_word(&current));
            current.clear();
        }
        current.push(token);
    }
    words.extend(finalize_word(&current));

    words
}

fn finalize_word(tokens: &[&Token]) -> Option<Word> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Word::new(first.start_seconds, last.end_seconds, text))
}
