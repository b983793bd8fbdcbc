//! Inline color-override markup, as understood by styled (ASS) subtitle renderers.
//!
//! A highlighted word looks like `{\c&HFFFF00&}word{\c&HFFFFFF&}`: switch to the highlight
//! color, write the word, switch back to white. A bare `{\c}` reset is also recognized when
//! stripping.

use std::sync::LazyLock;

use regex::Regex;

static COLOR_OVERRIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\\c&H[0-9A-Fa-f]{6}&\}|\{\\c\}").expect("color override pattern is valid")
});

/// Hex code the highlight reverts to after each highlighted word.
const RESET_HEX: &str = "FFFFFF";

/// Remove every color override from `text` and trim surrounding whitespace.
pub fn strip_markup(text: &str) -> String {
    COLOR_OVERRIDE.replace_all(text, "").trim().to_owned()
}

/// Wrap `word` in a color override using six hex digits (see [`crate::color::color_to_hex`]).
pub fn apply_highlight(word: &str, hex: &str) -> String {
    format!("{{\\c&H{hex}&}}{word}{{\\c&H{RESET_HEX}&}}")
}

/// Join `words` with single spaces, highlighting words `0..=upto`.
pub fn highlight_prefix<S: AsRef<str>>(words: &[S], upto: usize, hex: &str) -> String {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if i <= upto {
                apply_highlight(w.as_ref(), hex)
            } else {
                w.as_ref().to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_then_strip_recovers_word() {
        let marked = apply_highlight("hello", "FFFF00");
        assert_eq!(marked, r"{\c&HFFFF00&}hello{\c&HFFFFFF&}");
        assert_eq!(strip_markup(&marked), "hello");
    }

    #[test]
    fn strip_handles_bare_reset_and_lowercase_hex() {
        assert_eq!(strip_markup(r"  {\c&Hff00ff&}a{\c} b "), "a b");
    }

    #[test]
    fn strip_leaves_other_override_tags_alone() {
        assert_eq!(strip_markup(r"{\b1}bold{\b0}"), r"{\b1}bold{\b0}");
    }

    #[test]
    fn highlight_prefix_marks_leading_words_only() {
        let words = ["one", "two", "three"];
        let line = highlight_prefix(&words, 1, "FFFF00");
        assert_eq!(
            line,
            r"{\c&HFFFF00&}one{\c&HFFFFFF&} {\c&HFFFF00&}two{\c&HFFFFFF&} three"
        );
        assert_eq!(strip_markup(&line), "one two three");
    }
}
