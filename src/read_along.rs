//! Read-along ("karaoke") expansion.
//!
//! Every chunk of N words becomes N segments. Segment `i` shows the whole chunk with words
//! `0..=i` highlighted and lasts from word `i`'s start until word `i + 1` starts, so the
//! highlight never blinks off between words. The last segment ends with its own word.

use crate::chunker::{Budget, chunk_words};
use crate::color::color_to_hex;
use crate::markup::highlight_prefix;
use crate::segments::{Segment, Word};

/// Expand timed words into progressively highlighted segments.
///
/// `highlight_color` is a symbolic name resolved through [`crate::color`].
pub fn expand_read_along(
    words: impl IntoIterator<Item = Word>,
    budget: &Budget,
    highlight_color: &str,
) -> Vec<Segment> {
    let hex = color_to_hex(highlight_color);
    let mut out = Vec::new();
    for chunk in chunk_words(words, budget) {
        expand_chunk(&chunk, hex, &mut out);
    }
    out
}

/// Expand one chunk into `chunk.len()` segments appended to `out`.
pub fn expand_chunk(chunk: &[Word], hex: &str, out: &mut Vec<Segment>) {
    let texts: Vec<&str> = chunk.iter().map(|w| w.word.trim()).collect();
    for (i, word) in chunk.iter().enumerate() {
        let end_seconds = chunk
            .get(i + 1)
            .map_or(word.end_seconds, |next| next.start_seconds);
        out.push(Segment::new(
            word.start_seconds,
            end_seconds,
            highlight_prefix(&texts, i, hex),
        ));
    }
}
