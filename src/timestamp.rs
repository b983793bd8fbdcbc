//! Subtitle timestamp formatting and parsing.
//!
//! The two formats deliberately round differently:
//! - SRT (`HH:MM:SS,mmm`) truncates to the millisecond.
//! - ASS (`H:MM:SS.cc`) keeps the seconds as a float and rounds them to two decimals.

use anyhow::{Context, Result, bail};

/// Absorbs binary floating point error (e.g. `1.001 * 1000.0 == 1000.9999999999999`) before
/// truncating, so a parsed millisecond timestamp formats back to the same string.
const MS_EPSILON: f64 = 1e-4;

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`), truncating to the millisecond.
///
/// Negative input is clamped to zero.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0 + MS_EPSILON).floor() as u64;

    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Format seconds as an ASS timestamp (`H:MM:SS.cc`).
///
/// Hours are not padded. The seconds component is `seconds % 60` printed with two decimals,
/// so values just below a minute boundary (`59.996`) render as `60.00` rather than carrying
/// into the minutes.
pub fn format_ass_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let h = (seconds / 3600.0).floor() as u64;
    let m = ((seconds % 3600.0) / 60.0).floor() as u64;
    let s = seconds % 60.0;

    format!("{h}:{m:02}:{s:05.2}")
}

/// Parse an SRT timestamp (`HH:MM:SS,mmm`; a `.` separator is accepted too) into seconds.
pub fn parse_srt_timestamp(value: &str) -> Result<f64> {
    let normalized = value.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();
    if parts.len() != 3 {
        bail!("expected HH:MM:SS,mmm, got '{}'", value.trim());
    }

    let hours: u64 = parts[0]
        .parse()
        .with_context(|| format!("invalid hours in '{}'", value.trim()))?;
    let minutes: u64 = parts[1]
        .parse()
        .with_context(|| format!("invalid minutes in '{}'", value.trim()))?;
    let seconds: f64 = parts[2]
        .parse()
        .with_context(|| format!("invalid seconds in '{}'", value.trim()))?;
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("invalid seconds in '{}'", value.trim());
    }

    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srt_formats_and_truncates() {
        assert_eq!(format_srt_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_srt_timestamp(1.2349), "00:00:01,234");
        assert_eq!(format_srt_timestamp(3661.5), "01:01:01,500");
        assert_eq!(format_srt_timestamp(-3.0), "00:00:00,000");
    }

    #[test]
    fn srt_survives_float_representation_error() {
        assert_eq!(format_srt_timestamp(1.001), "00:00:01,001");
        assert_eq!(format_srt_timestamp(0.29), "00:00:00,290");
    }

    #[test]
    fn ass_formats_with_unpadded_hours_and_centiseconds() {
        assert_eq!(format_ass_timestamp(0.0), "0:00:00.00");
        assert_eq!(format_ass_timestamp(5.5), "0:00:05.50");
        assert_eq!(format_ass_timestamp(3725.456), "1:02:05.46");
    }

    #[test]
    fn ass_rounds_where_srt_truncates() {
        assert_eq!(format_srt_timestamp(1.238), "00:00:01,238");
        assert_eq!(format_ass_timestamp(1.238), "0:00:01.24");
        assert_eq!(format_ass_timestamp(59.996), "0:00:60.00");
    }

    #[test]
    fn parse_round_trips_millisecond_timestamps() -> anyhow::Result<()> {
        for ts in ["00:00:00,000", "00:00:01,001", "01:02:03,456", "10:59:59,999"] {
            assert_eq!(format_srt_timestamp(parse_srt_timestamp(ts)?), ts);
        }
        Ok(())
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(parse_srt_timestamp("00:01,000").is_err());
        assert!(parse_srt_timestamp("aa:00:01,000").is_err());
        assert!(parse_srt_timestamp("00:00:xx").is_err());
    }
}
