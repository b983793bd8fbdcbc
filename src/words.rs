//! Turning coarse segments into per-word timing.

use crate::markup::strip_markup;
use crate::segments::{Segment, Word};

/// Expand `segments` into one [`Word`] per spoken word.
///
/// Recognized word timing is trusted when a segment carries it. Otherwise the segment's text
/// (with color markup removed) is split on whitespace and its duration divided evenly across
/// the tokens. A segment with zero or one token becomes a single word spanning the segment.
pub fn extract_words(segments: &[Segment]) -> Vec<Word> {
    let mut words = Vec::new();
    for seg in segments {
        if seg.has_words() {
            words.extend(seg.words.iter().map(|w| {
                Word::new(w.start_seconds, w.end_seconds, w.word.trim())
            }));
        } else {
            split_evenly(seg, &mut words);
        }
    }
    words
}

fn split_evenly(seg: &Segment, out: &mut Vec<Word>) {
    let text = strip_markup(&seg.text);
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() <= 1 {
        out.push(Word::new(seg.start_seconds, seg.end_seconds, text.as_str()));
        return;
    }

    let word_duration = (seg.end_seconds - seg.start_seconds) / tokens.len() as f64;
    for (i, token) in tokens.iter().enumerate() {
        out.push(Word::new(
            seg.start_seconds + i as f64 * word_duration,
            seg.start_seconds + (i + 1) as f64 * word_duration,
            *token,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn divides_duration_evenly_across_tokens() {
        let words = extract_words(&[Segment::new(1.0, 3.0, "one two  three four")]);
        let texts: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three", "four"]);
        assert!(close(words[0].start_seconds, 1.0));
        assert!(close(words[1].start_seconds, 1.5));
        assert!(close(words[3].end_seconds, 3.0));
        for pair in words.windows(2) {
            assert!(close(pair[0].end_seconds, pair[1].start_seconds));
        }
    }

    #[test]
    fn trusts_recognized_word_timing() {
        let seg = Segment::new(0.0, 2.0, " hi there").with_words(vec![
            Word::new(0.1, 0.4, " hi"),
            Word::new(0.9, 1.7, " there "),
        ]);
        let words = extract_words(&[seg]);
        assert_eq!(
            words,
            vec![Word::new(0.1, 0.4, "hi"), Word::new(0.9, 1.7, "there")]
        );
    }

    #[test]
    fn single_or_empty_text_becomes_one_word() {
        let words = extract_words(&[Segment::new(0.0, 1.0, " solo "), Segment::new(1.0, 2.0, "")]);
        assert_eq!(
            words,
            vec![Word::new(0.0, 1.0, "solo"), Word::new(1.0, 2.0, "")]
        );
    }

    #[test]
    fn strips_highlight_markup_before_tokenizing() {
        let words = extract_words(&[Segment::new(
            0.0,
            2.0,
            r"{\c&HFFFF00&}hello{\c&HFFFFFF&} world",
        )]);
        let texts: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(texts, ["hello", "world"]);
    }

    #[test]
    fn mixes_timed_and_untimed_segments_in_order() {
        let timed = Segment::new(0.0, 1.0, "a").with_words(vec![Word::new(0.0, 1.0, "a")]);
        let untimed = Segment::new(1.0, 3.0, "b c");
        let words = extract_words(&[timed, untimed]);
        let texts: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }
}
