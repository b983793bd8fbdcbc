//! Parsing existing SRT subtitle files into segments.
//!
//! Blocks are separated by blank lines. Each block is an index line (ignored), a
//! `start --> end` timing line and one or more text lines. Any malformed block aborts the parse
//! with [`Error::SubtitleParse`] naming the block.

use std::io::Read;
use std::path::Path;

use crate::Result;
use crate::error::Error;
use crate::segments::Segment;
use crate::timestamp::parse_srt_timestamp;

/// Read and parse an SRT file from disk.
pub fn read_srt_file(path: impl AsRef<Path>) -> Result<Vec<Segment>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::msg(format!("failed to read '{}': {e}", path.display())))?;
    parse_srt(&content)
}

/// Read and parse SRT content from any reader.
pub fn read_srt<R: Read>(mut r: R) -> Result<Vec<Segment>> {
    let mut content = String::new();
    r.read_to_string(&mut content)?;
    parse_srt(&content)
}

/// Parse SRT text.
pub fn parse_srt(content: &str) -> Result<Vec<Segment>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut segments = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut block_no = 0;

    for line in content.lines() {
        if line.trim().is_empty() {
            if !block.is_empty() {
                block_no += 1;
                segments.push(parse_block(block_no, &block)?);
                block.clear();
            }
            continue;
        }
        block.push(line.trim_end_matches('\r'));
    }
    if !block.is_empty() {
        block_no += 1;
        segments.push(parse_block(block_no, &block)?);
    }

    Ok(segments)
}

fn parse_block(block_no: usize, lines: &[&str]) -> Result<Segment> {
    if lines.len() < 3 {
        return Err(Error::subtitle_parse(
            block_no,
            format!("expected index, timing and text lines, got {} line(s)", lines.len()),
        ));
    }

    let timing = lines[1];
    let (start, end) = timing.split_once("-->").ok_or_else(|| {
        Error::subtitle_parse(block_no, format!("missing ' --> ' in timing line '{timing}'"))
    })?;

    let start_seconds = parse_srt_timestamp(start)
        .map_err(|e| Error::subtitle_parse(block_no, format!("bad start time: {e:#}")))?;
    let end_seconds = parse_srt_timestamp(end)
        .map_err(|e| Error::subtitle_parse(block_no, format!("bad end time: {e:#}")))?;

    Ok(Segment::new(start_seconds, end_seconds, lines[2..].join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:01,500\nHello there\n\n2\n00:00:01,500 --> 00:00:03,250\nTwo\nlines\n";

    #[test]
    fn parses_blocks() -> anyhow::Result<()> {
        let segs = parse_srt(SAMPLE)?;
        assert_eq!(
            segs,
            vec![
                Segment::new(0.0, 1.5, "Hello there"),
                Segment::new(1.5, 3.25, "Two\nlines"),
            ]
        );
        Ok(())
    }

    #[test]
    fn tolerates_crlf_bom_and_extra_blank_lines() -> anyhow::Result<()> {
        let content = format!("\u{feff}\r\n\r\n{}\r\n\r\n\r\n", SAMPLE.replace('\n', "\r\n"));
        let segs = parse_srt(&content)?;
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].text, "Two\nlines");
        Ok(())
    }

    #[test]
    fn short_block_is_reported_with_its_index() {
        let content = "1\n00:00:00,000 --> 00:00:01,000\nok\n\n2\n00:00:01,000 --> 00:00:02,000\n";
        let err = parse_srt(content).unwrap_err();
        assert!(matches!(err, Error::SubtitleParse { block: 2, .. }), "{err}");
    }

    #[test]
    fn missing_arrow_is_reported() {
        let err = parse_srt("1\n00:00:00,000 00:00:01,000\ntext\n").unwrap_err();
        assert!(err.to_string().contains("block 1"));
        assert!(err.to_string().contains("-->"));
    }

    #[test]
    fn bad_time_component_is_reported() {
        let err = parse_srt("1\n00:00:xx,000 --> 00:00:01,000\ntext\n").unwrap_err();
        assert!(matches!(err, Error::SubtitleParse { block: 1, .. }));
        assert!(err.to_string().contains("bad start time"));
    }

    #[test]
    fn empty_input_has_no_segments() -> anyhow::Result<()> {
        assert!(parse_srt("")?.is_empty());
        assert!(parse_srt("\n\n  \n")?.is_empty());
        Ok(())
    }

    #[test]
    fn reads_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("in.srt");
        std::fs::write(&path, SAMPLE)?;
        assert_eq!(read_srt_file(&path)?.len(), 2);
        assert!(read_srt_file(dir.path().join("missing.srt")).is_err());
        Ok(())
    }
}
