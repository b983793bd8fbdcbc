//! Symbolic color names and their hex representation.
//!
//! The hex digits are emitted verbatim after `&H` in styled subtitles, both in style records
//! and in inline highlight overrides.

/// Hex code used for any name the table does not know.
pub const FALLBACK_HEX: &str = "FFFFFF";

const COLORS: &[(&str, &str)] = &[
    ("white", "FFFFFF"),
    ("black", "000000"),
    ("red", "FF0000"),
    ("green", "00FF00"),
    ("blue", "0000FF"),
    ("yellow", "FFFF00"),
    ("cyan", "00FFFF"),
    ("magenta", "FF00FF"),
];

/// Resolve a color name (case-insensitive) to six hex digits.
///
/// Unknown names resolve to white rather than failing; a typo in a color flag should never
/// abort a long transcription run.
pub fn color_to_hex(name: &str) -> &'static str {
    lookup(name).unwrap_or_else(|| {
        tracing::debug!(color = name, "unknown color name, using white");
        FALLBACK_HEX
    })
}

/// Strict lookup, for callers that want to reject unknown names.
pub fn lookup(name: &str) -> Option<&'static str> {
    let name = name.trim();
    COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// All known color names, in table order.
pub fn names() -> impl Iterator<Item = &'static str> {
    COLORS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_names_case_insensitively() {
        assert_eq!(color_to_hex("yellow"), "FFFF00");
        assert_eq!(color_to_hex("Yellow"), "FFFF00");
        assert_eq!(color_to_hex(" MAGENTA "), "FF00FF");
    }

    #[test]
    fn unknown_names_fall_back_to_white() {
        assert_eq!(color_to_hex("chartreuse"), FALLBACK_HEX);
        assert_eq!(lookup("chartreuse"), None);
    }

    #[test]
    fn every_entry_is_six_hex_digits() {
        for name in names() {
            let hex = color_to_hex(name);
            assert_eq!(hex.len(), 6, "{name}");
            assert!(hex.chars().all(|c| c.is_ascii_hexdigit()), "{name}");
        }
    }
}
