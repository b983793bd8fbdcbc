//! Re-chunking segments so each fits a character and duration budget.
//!
//! Two strategies live here:
//! - [`split_long_segments`] works on whole segment text and re-times sub-chunks evenly.
//! - [`chunk_words`] accumulates timed words into chunks. It is shared with the read-along
//!   expander and backs [`group_words`].
//!
//! Neither ever splits a word. A single word longer than the character budget becomes its own
//! chunk rather than being truncated.

use crate::Result;
use crate::error::Error;
use crate::markup::strip_markup;
use crate::segments::{Segment, Word};

/// Character and duration limits for one output segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    max_chars: usize,
    max_duration: f64,
}

impl Budget {
    /// Build a budget, rejecting limits that could never be satisfied.
    pub fn new(max_chars: usize, max_duration: f64) -> Result<Self> {
        if max_chars == 0 {
            return Err(Error::config("max_chars must be at least 1"));
        }
        if !max_duration.is_finite() || max_duration <= 0.0 {
            return Err(Error::config(format!(
                "max_duration must be a positive number of seconds, got {max_duration}"
            )));
        }
        Ok(Self {
            max_chars,
            max_duration,
        })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Whether a chunk currently `used` characters long can take `word_len` more plus a
    /// separating space.
    fn fits(&self, used: usize, word_len: usize) -> bool {
        used + word_len + 1 <= self.max_chars
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split segments whose text or duration exceed `budget`.
///
/// Segments within both limits pass through untouched. Over-budget text is packed greedily into
/// word-aligned chunks and the segment's duration is spread evenly across them, each chunk
/// capped at `max_duration` and the last clamped to the original end.
///
/// Color markup is ignored when measuring and is dropped from split chunks.
///
/// A segment whose text fits in a single chunk is emitted unchanged even when it is too long in
/// time: only character overflows are repaired here.
pub fn split_long_segments(segments: &[Segment], budget: &Budget) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for seg in segments {
        let text = strip_markup(&seg.text);
        let duration = seg.duration();
        if char_len(&text) <= budget.max_chars && duration <= budget.max_duration {
            out.push(seg.clone());
            continue;
        }

        let chunks = pack_text(&text, budget);
        if chunks.len() <= 1 {
            tracing::trace!(
                start = seg.start_seconds,
                duration,
                "segment over duration budget but not splittable by text"
            );
            out.push(seg.clone());
            continue;
        }

        let chunk_duration = budget.max_duration.min(duration / chunks.len() as f64);
        for (i, chunk) in chunks.into_iter().enumerate() {
            let start = seg.start_seconds + i as f64 * chunk_duration;
            let end = (seg.start_seconds + (i + 1) as f64 * chunk_duration).min(seg.end_seconds);
            out.push(Segment::new(start, end, chunk));
        }
    }
    out
}

/// Greedily pack whitespace-separated words into lines of at most `max_chars` characters.
pub fn pack_text(text: &str, budget: &Budget) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = char_len(word);
        if !current.is_empty() && budget.fits(used, len) {
            current.push(word);
            used += len + 1;
        } else {
            if !current.is_empty() {
                chunks.push(current.join(" "));
            }
            current = vec![word];
            used = len;
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}

/// Words gathered for one forthcoming output segment.
#[derive(Debug)]
struct Chunk {
    words: Vec<Word>,
    chars: usize,
    start_seconds: f64,
}

impl Chunk {
    fn open(word: Word, len: usize) -> Self {
        Self {
            start_seconds: word.start_seconds,
            words: vec![word],
            chars: len,
        }
    }
}

/// Accumulation state for [`chunk_words`].
#[derive(Debug)]
enum ChunkState {
    Empty,
    Accumulating(Chunk),
}

impl ChunkState {
    /// Feed one word, pushing any completed chunks into `flushed`.
    ///
    /// A word that does not fit the character budget closes the current chunk and opens a new
    /// one. After the word is placed, a chunk whose span from its first start to this word's
    /// end reaches `max_duration` is closed immediately, overflowing word included.
    fn push(self, word: Word, budget: &Budget, flushed: &mut Vec<Vec<Word>>) -> Self {
        let len = char_len(word.word.trim());
        let word_end = word.end_seconds;

        let chunk = match self {
            ChunkState::Accumulating(mut chunk) if budget.fits(chunk.chars, len) => {
                chunk.chars += len + 1;
                chunk.words.push(word);
                chunk
            }
            ChunkState::Accumulating(chunk) => {
                flushed.push(chunk.words);
                Chunk::open(word, len)
            }
            ChunkState::Empty => Chunk::open(word, len),
        };

        if word_end - chunk.start_seconds >= budget.max_duration {
            flushed.push(chunk.words);
            ChunkState::Empty
        } else {
            ChunkState::Accumulating(chunk)
        }
    }

    fn finish(self, flushed: &mut Vec<Vec<Word>>) {
        if let ChunkState::Accumulating(chunk) = self {
            flushed.push(chunk.words);
        }
    }
}

/// Group timed words into non-empty chunks bounded by `budget`, preserving word order.
pub fn chunk_words(words: impl IntoIterator<Item = Word>, budget: &Budget) -> Vec<Vec<Word>> {
    let mut flushed = Vec::new();
    let state = words.into_iter().fold(ChunkState::Empty, |state, word| {
        state.push(word, budget, &mut flushed)
    });
    state.finish(&mut flushed);
    flushed
}

/// Word-level chunking: one plain segment per chunk, timed from its first word's start to its
/// last word's end, keeping the words it was built from.
pub fn group_words(words: impl IntoIterator<Item = Word>, budget: &Budget) -> Vec<Segment> {
    chunk_words(words, budget)
        .into_iter()
        .filter_map(|chunk| {
            let start = chunk.first()?.start_seconds;
            let end = chunk.last()?.end_seconds;
            let text = chunk
                .iter()
                .map(|w| w.word.trim())
                .collect::<Vec<_>>()
                .join(" ");
            Some(Segment::new(start, end, text).with_words(chunk))
        })
        .collect()
}
