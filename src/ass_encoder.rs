use std::io::Write;

use crate::Result;
use crate::color::color_to_hex;
use crate::error::Error;
use crate::opts::Style;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;
use crate::timestamp::format_ass_timestamp;

/// Canvas the style's font size and margins are relative to.
pub const PLAY_RES_X: u32 = 1920;
pub const PLAY_RES_Y: u32 = 1080;

const STYLE_FORMAT: &str = "Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding";

const EVENT_FORMAT: &str =
    "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// A `SegmentEncoder` that writes an Advanced SubStation Alpha (`.ass`) script.
///
/// The script header, a single `Default` style and the events header are written lazily before
/// the first dialogue line, or on close if no segment was ever written, so the output is always
/// a loadable script.
pub struct AssEncoder<W: Write> {
    w: W,
    style: Style,

    /// Whether the header sections have been written.
    started: bool,

    closed: bool,
}

impl<W: Write> AssEncoder<W> {
    pub fn new(w: W, style: Style) -> Self {
        Self {
            w,
            style,
            started: false,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }

        writeln!(&mut self.w, "[Script Info]")?;
        writeln!(&mut self.w, "ScriptType: v4.00+")?;
        writeln!(&mut self.w, "PlayResX: {PLAY_RES_X}")?;
        writeln!(&mut self.w, "PlayResY: {PLAY_RES_Y}")?;
        writeln!(&mut self.w, "ScaledBorderAndShadow: yes")?;
        writeln!(&mut self.w)?;

        writeln!(&mut self.w, "[V4+ Styles]")?;
        writeln!(&mut self.w, "{STYLE_FORMAT}")?;
        writeln!(&mut self.w, "{}", style_line(&self.style))?;
        writeln!(&mut self.w)?;

        writeln!(&mut self.w, "[Events]")?;
        writeln!(&mut self.w, "{EVENT_FORMAT}")?;

        self.started = true;
        Ok(())
    }
}

/// The `Style: Default,...` record for `style`.
pub fn style_line(style: &Style) -> String {
    let hex = color_to_hex(&style.color);
    format!(
        "Style: Default,{font},{size},&H{hex},&H{hex},&H000000,&H000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1",
        font = style.font,
        size = style.font_size,
    )
}

impl<W: Write> SegmentEncoder for AssEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write segment: encoder is already closed"));
        }

        self.start_if_needed()?;

        let start = format_ass_timestamp(seg.start_seconds);
        let end = format_ass_timestamp(seg.end_seconds);
        // A raw newline would end the event; ASS spells a hard line break `\N`.
        let text = seg.text.trim().replace("\r\n", "\n").replace('\n', "\\N");

        writeln!(
            &mut self.w,
            "Dialogue: 0,{start},{end},Default,,0,0,0,,{text}"
        )?;
        self.w.flush()?;

        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;
        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}
