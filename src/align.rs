//! Reconciling an externally written script with recognized word timing.
//!
//! The aligner is a greedy, single-pass walk over two token streams: the script's words and the
//! recognizer's words. It never backtracks, so it is a heuristic rather than an optimal
//! edit-distance alignment: a script word the recognizer never produced stalls the script
//! cursor until the recognizer stream runs out.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::segments::Segment;

static SCRIPT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("script word pattern is valid"));

/// A script token: the text as written plus its lowercase comparison key.
struct ScriptToken<'a> {
    text: &'a str,
    key: String,
}

/// A recognized token with its timing.
struct Heard {
    key: String,
    start_seconds: f64,
    end_seconds: f64,
}

/// Align `script` against `recognized`, falling back to `recognized` unchanged (with a warning)
/// when not a single word could be matched.
pub fn align_script(script: &str, recognized: &[Segment]) -> Vec<Segment> {
    match try_align_script(script, recognized) {
        Some(aligned) => aligned,
        None => {
            warn!(
                recognized_segments = recognized.len(),
                "could not align script with audio, using the plain transcription"
            );
            recognized.to_vec()
        }
    }
}

/// Align `script` against `recognized`, returning `None` when nothing matched.
///
/// Each emitted segment takes its timing from a recognized word and its text from the script.
pub fn try_align_script(script: &str, recognized: &[Segment]) -> Option<Vec<Segment>> {
    let script_tokens = tokenize_script(script);
    let heard = flatten_recognized(recognized);

    let mut aligned = Vec::new();
    let mut text_idx = 0;
    let mut heard_idx = 0;

    while text_idx < script_tokens.len() && heard_idx < heard.len() {
        let token = &script_tokens[text_idx];
        let word = &heard[heard_idx];

        if token.key == word.key || word.key.contains(&token.key) || token.key.contains(&word.key)
        {
            aligned.push(Segment::new(word.start_seconds, word.end_seconds, token.text));
            text_idx += 1;
        }
        heard_idx += 1;
    }

    debug!(
        script_words = script_tokens.len(),
        recognized_words = heard.len(),
        matched = aligned.len(),
        "script alignment finished"
    );

    if aligned.is_empty() {
        None
    } else {
        Some(aligned)
    }
}

fn tokenize_script(script: &str) -> Vec<ScriptToken<'_>> {
    SCRIPT_WORD
        .find_iter(script)
        .map(|m| ScriptToken {
            text: m.as_str(),
            key: m.as_str().to_lowercase(),
        })
        .collect()
}

/// Recognized words in order. Segments without word timing contribute their whole text as one
/// token, which only aligns meaningfully for single-word segments.
fn flatten_recognized(segments: &[Segment]) -> Vec<Heard> {
    let mut heard = Vec::new();
    for seg in segments {
        if seg.has_words() {
            for w in &seg.words {
                push_heard(&mut heard, &w.word, w.start_seconds, w.end_seconds);
            }
        } else {
            push_heard(&mut heard, &seg.text, seg.start_seconds, seg.end_seconds);
        }
    }
    heard
}

fn push_heard(heard: &mut Vec<Heard>, text: &str, start_seconds: f64, end_seconds: f64) {
    let key = text.trim().to_lowercase();
    // An empty key is a substring of everything and would match any script word.
    if key.is_empty() {
        return;
    }
    heard.push(Heard {
        key,
        start_seconds,
        end_seconds,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::Word;

    fn recognized(words: &[(&str, f64, f64)]) -> Vec<Segment> {
        let start = words.first().map_or(0.0, |w| w.1);
        let end = words.last().map_or(0.0, |w| w.2);
        let text = words.iter().map(|w| w.0).collect::<Vec<_>>().join(" ");
        vec![Segment::new(start, end, text).with_words(
            words
                .iter()
                .map(|(w, s, e)| Word::new(*s, *e, format!(" {w}")))
                .collect(),
        )]
    }

    #[test]
    fn exact_match_uses_recognized_timing() {
        let rec = recognized(&[("hello", 0.0, 0.5), ("world", 0.6, 1.0)]);
        let aligned = align_script("hello world", &rec);
        assert_eq!(
            aligned,
            vec![Segment::new(0.0, 0.5, "hello"), Segment::new(0.6, 1.0, "world")]
        );
    }

    #[test]
    fn script_casing_wins_over_recognized_text() {
        let rec = recognized(&[("hello", 0.0, 0.5), ("world", 0.6, 1.0)]);
        let aligned = align_script("Hello, World!", &rec);
        let texts: Vec<&str> = aligned.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["Hello", "World"]);
    }

    #[test]
    fn substring_matches_in_either_direction() {
        let rec = recognized(&[("world,", 0.0, 0.5), ("go", 0.6, 1.0)]);
        let aligned = align_script("world going", &rec);
        assert_eq!(
            aligned,
            vec![Segment::new(0.0, 0.5, "world"), Segment::new(0.6, 1.0, "going")]
        );
    }

    #[test]
    fn unmatched_recognized_words_are_skipped() {
        let rec = recognized(&[("um", 0.0, 0.2), ("hello", 0.3, 0.6), ("uh", 0.7, 0.8)]);
        let aligned = align_script("hello", &rec);
        assert_eq!(aligned, vec![Segment::new(0.3, 0.6, "hello")]);
    }

    #[test]
    fn total_mismatch_falls_back_to_recognized_segments() {
        let rec = recognized(&[("hello", 0.0, 1.0)]);
        assert!(try_align_script("xyz123", &rec).is_none());
        assert_eq!(align_script("xyz123", &rec), rec);
    }

    #[test]
    fn segments_without_words_align_on_whole_text() {
        let rec = vec![Segment::new(0.0, 1.0, " Hi "), Segment::new(1.0, 2.0, "there")];
        let aligned = align_script("hi there", &rec);
        assert_eq!(
            aligned,
            vec![Segment::new(0.0, 1.0, "hi"), Segment::new(1.0, 2.0, "there")]
        );
    }

    #[test]
    fn empty_inputs_fall_back() {
        assert!(try_align_script("", &recognized(&[("a", 0.0, 1.0)])).is_none());
        assert!(align_script("hello", &[]).is_empty());
    }
}
