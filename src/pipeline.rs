//! High-level track building and writing.
//!
//! The engine is a pure function from segments + [`Opts`] to segments:
//!
//! - [`Mode::Whole`]: whole-text chunking.
//! - [`Mode::Word`]: word extraction, one subtitle per word.
//! - [`Mode::WordGroups`]: word extraction, then word-level chunking.
//! - [`Mode::Read`]: word extraction, read-along expansion, gap closing.
//!
//! Gap closing is optional for the other modes (`Opts::close_gaps`). Script alignment, when
//! needed, happens before this on the recognized segments (see [`crate::align`]).

use std::io::{BufWriter, Write};

use tracing::{debug, info};

use crate::Result;
use crate::ass_encoder::AssEncoder;
use crate::chunker::{group_words, split_long_segments};
use crate::gaps::close_gaps;
use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::{Mode, Opts, Style};
use crate::output_type::OutputType;
use crate::read_along::expand_read_along;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::srt_encoder::SrtEncoder;
use crate::words::extract_words;

/// Reshape `segments` into a finished subtitle track according to `opts`.
pub fn build_track(segments: &[Segment], opts: &Opts) -> Result<Vec<Segment>> {
    let budget = opts.budget()?;

    let mut track = match opts.mode {
        Mode::Whole => split_long_segments(segments, &budget),
        Mode::Word => extract_words(segments).into_iter().map(Segment::from).collect(),
        Mode::WordGroups => group_words(extract_words(segments), &budget),
        Mode::Read => expand_read_along(extract_words(segments), &budget, &opts.highlight_color),
    };

    if opts.close_gaps || opts.mode == Mode::Read {
        close_gaps(&mut track);
    }

    info!(
        mode = ?opts.mode,
        input_segments = segments.len(),
        output_segments = track.len(),
        "built subtitle track"
    );
    Ok(track)
}

/// The output format a mode calls for when the caller did not choose one.
///
/// Read-along highlighting is markup that only the styled format renders.
pub fn default_output_type(mode: Mode) -> OutputType {
    match mode {
        Mode::Read => OutputType::Ass,
        Mode::Whole | Mode::Word | Mode::WordGroups => OutputType::Srt,
    }
}

/// Encode `segments` into `w` in the requested format.
///
/// The encoder is always closed, even if a write failed, and both errors are reported.
pub fn write_track<W: Write>(
    segments: &[Segment],
    w: W,
    output_type: OutputType,
    style: &Style,
) -> Result<()> {
    let writer = BufWriter::new(w);

    // Keep this explicit (no trait objects) to avoid lifetime surprises.
    match output_type {
        OutputType::Srt => {
            let mut encoder = SrtEncoder::new(writer);
            let run_res = write_all(segments, &mut encoder);
            merge_run_and_close(run_res, encoder.close())
        }
        OutputType::Ass => {
            let mut encoder = AssEncoder::new(writer, style.clone());
            let run_res = write_all(segments, &mut encoder);
            merge_run_and_close(run_res, encoder.close())
        }
        OutputType::Json => {
            let mut encoder = JsonArrayEncoder::new(writer);
            let run_res = write_all(segments, &mut encoder);
            merge_run_and_close(run_res, encoder.close())
        }
    }
}

/// Write `segments` to a new file at `path`.
pub fn write_track_file(
    segments: &[Segment],
    path: impl AsRef<std::path::Path>,
    output_type: OutputType,
    style: &Style,
) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| {
        crate::Error::msg(format!("failed to create '{}': {e}", path.display()))
    })?;
    debug!(path = %path.display(), ?output_type, "writing subtitle track");
    write_track(segments, file, output_type, style)
}

fn write_all<E: SegmentEncoder>(segments: &[Segment], encoder: &mut E) -> Result<()> {
    for seg in segments {
        encoder.write_segment(seg)?;
    }
    Ok(())
}

fn merge_run_and_close(run_res: Result<()>, close_res: Result<()>) -> Result<()> {
    match (run_res, close_res) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(close_err)) => Err(close_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => Err(crate::Error::msg(format!(
            "{err}; additionally failed to close encoder: {close_err}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::markup::strip_markup;
    use crate::segments::Word;

    fn opts(mode: Mode) -> Opts {
        Opts {
            mode,
            ..Opts::default()
        }
    }

    #[test]
    fn whole_mode_splits_long_text() -> anyhow::Result<()> {
        let input = [Segment::new(0.0, 2.0, "a fairly long sentence that needs splitting")];
        let track = build_track(&input, &opts(Mode::Whole))?;
        assert!(track.len() > 1);
        assert!(track.iter().all(|s| s.text.chars().count() <= 30));
        Ok(())
    }

    #[test]
    fn word_mode_emits_one_subtitle_per_word() -> anyhow::Result<()> {
        let input = [Segment::new(0.0, 2.0, "two words")];
        let track = build_track(&input, &opts(Mode::Word))?;
        assert_eq!(
            track,
            vec![Segment::new(0.0, 1.0, "two"), Segment::new(1.0, 2.0, "words")]
        );
        Ok(())
    }

    #[test]
    fn word_groups_mode_keeps_recognized_timing() -> anyhow::Result<()> {
        let input = [Segment::new(0.0, 3.0, "hi there").with_words(vec![
            Word::new(0.2, 0.5, " hi"),
            Word::new(1.0, 1.4, " there"),
        ])];
        let track = build_track(&input, &opts(Mode::WordGroups))?;
        assert_eq!(track.len(), 1);
        assert_eq!(track[0].text, "hi there");
        assert_eq!((track[0].start_seconds, track[0].end_seconds), (0.2, 1.4));
        Ok(())
    }

    #[test]
    fn read_mode_expands_and_closes_gaps() -> anyhow::Result<()> {
        let input = [
            Segment::new(0.0, 1.0, "a b"),
            Segment::new(5.0, 6.0, "c"),
        ];
        // "a b" fills the three-character budget, so "c" starts a second chunk.
        let o = Opts {
            max_chars: 3,
            ..opts(Mode::Read)
        };
        let track = build_track(&input, &o)?;
        assert_eq!(track.len(), 3);
        assert_eq!(track[1].end_seconds, 5.0);
        assert_eq!(strip_markup(&track[0].text), "a b");
        assert_eq!(strip_markup(&track[2].text), "c");
        for pair in track.windows(2) {
            assert!(pair[0].end_seconds <= pair[1].start_seconds);
        }
        Ok(())
    }

    #[test]
    fn close_gaps_flag_applies_to_other_modes() -> anyhow::Result<()> {
        let input = [Segment::new(0.0, 1.0, "a"), Segment::new(2.0, 3.0, "b")];
        let mut o = opts(Mode::Whole);
        assert_eq!(build_track(&input, &o)?[0].end_seconds, 1.0);
        o.close_gaps = true;
        assert_eq!(build_track(&input, &o)?[0].end_seconds, 2.0);
        Ok(())
    }

    #[test]
    fn degenerate_budget_is_a_config_error() {
        let o = Opts {
            max_chars: 0,
            ..Opts::default()
        };
        let err = build_track(&[Segment::new(0.0, 1.0, "x")], &o).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn read_mode_defaults_to_styled_output() {
        assert_eq!(default_output_type(Mode::Read), OutputType::Ass);
        assert_eq!(default_output_type(Mode::Word), OutputType::Srt);
    }

    #[test]
    fn write_track_encodes_each_format() -> anyhow::Result<()> {
        let track = [Segment::new(0.0, 1.5, "hello")];

        let mut srt = Vec::new();
        write_track(&track, &mut srt, OutputType::Srt, &Style::default())?;
        assert_eq!(
            String::from_utf8(srt)?,
            "1\n00:00:00,000 --> 00:00:01,500\nhello\n\n"
        );

        let mut ass = Vec::new();
        write_track(&track, &mut ass, OutputType::Ass, &Style::default())?;
        assert!(String::from_utf8(ass)?.ends_with(
            "Dialogue: 0,0:00:00.00,0:00:01.50,Default,,0,0,0,,hello\n"
        ));

        let mut json = Vec::new();
        write_track(&track, &mut json, OutputType::Json, &Style::default())?;
        assert_eq!(
            String::from_utf8(json)?,
            r#"[{"start":0.0,"end":1.5,"text":"hello"}]"#
        );
        Ok(())
    }
}
