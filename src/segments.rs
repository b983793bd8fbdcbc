use serde::{Deserialize, Serialize};

/// A timed text interval.
///
/// Segments are the currency of the whole crate: transcribers produce them, the subtitle reader
/// parses them, the engine re-chunks them and encoders serialize them.
///
/// `end_seconds >= start_seconds` is expected but not enforced; a zero-length segment is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "start")]
    pub start_seconds: f64,
    #[serde(rename = "end")]
    pub end_seconds: f64,
    #[serde(default)]
    pub text: String,

    /// Recognized per-word timing, ordered by start time. Empty when the source had none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
}

/// A timed single token nested within a [`Segment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "start")]
    pub start_seconds: f64,
    #[serde(rename = "end")]
    pub end_seconds: f64,
    pub word: String,
}

impl Segment {
    /// A segment without word-level timing.
    pub fn new(start_seconds: f64, end_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text: text.into(),
            words: Vec::new(),
        }
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = words;
        self
    }

    /// Duration in seconds, clamped at zero.
    pub fn duration(&self) -> f64 {
        (self.end_seconds - self.start_seconds).max(0.0)
    }

    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }
}

impl Word {
    pub fn new(start_seconds: f64, end_seconds: f64, word: impl Into<String>) -> Self {
        Self {
            start_seconds,
            end_seconds,
            word: word.into(),
        }
    }
}

impl From<Word> for Segment {
    fn from(word: Word) -> Self {
        Segment::new(word.start_seconds, word.end_seconds, word.word)
    }
}

/// Whether any segment in `segments` carries recognized word timing.
pub fn any_word_timing(segments: &[Segment]) -> bool {
    segments.iter().any(Segment::has_words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_never_goes_negative() {
        assert_eq!(Segment::new(2.0, 1.0, "x").duration(), 0.0);
        assert_eq!(Segment::new(1.0, 1.0, "x").duration(), 0.0);
        assert!((Segment::new(1.0, 2.5, "x").duration() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn deserializes_transcriber_shape_with_and_without_words() -> anyhow::Result<()> {
        let json = r#"[
            {"start": 0.0, "end": 1.0, "text": " hi there",
             "words": [{"start": 0.0, "end": 0.4, "word": " hi"},
                       {"start": 0.5, "end": 1.0, "word": " there"}]},
            {"start": 1.0, "end": 2.0}
        ]"#;
        let segments: Vec<Segment> = serde_json::from_str(json)?;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].words.len(), 2);
        assert_eq!(segments[0].words[1].word, " there");
        assert_eq!(segments[1].text, "");
        assert!(any_word_timing(&segments));
        Ok(())
    }

    #[test]
    fn serialization_omits_empty_words() -> anyhow::Result<()> {
        let s = serde_json::to_string(&Segment::new(0.0, 1.0, "a"))?;
        assert_eq!(s, r#"{"start":0.0,"end":1.0,"text":"a"}"#);
        Ok(())
    }
}
