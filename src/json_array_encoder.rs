use std::io::Write;

use crate::Result;
use crate::error::Error;
use crate::segment_encoder::SegmentEncoder;
use crate::segments::Segment;

/// A `SegmentEncoder` that writes segments as a single JSON array.
///
/// The output is the same shape [`crate::transcript::read_transcript`] accepts, which makes it
/// a convenient way to cache a transcription (word timing included) and re-chunk it later.
///
/// ```json
/// [{"start":0.0,"end":1.2,"text":"hello"},{"start":1.2,"end":2.5,"text":"world"}]
/// ```
pub struct JsonArrayEncoder<W: Write> {
    w: W,

    /// Whether the opening `[` has been written.
    started: bool,

    /// Whether the next element is the first, so commas land between elements only.
    first: bool,

    closed: bool,
}

impl<W: Write> JsonArrayEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            first: true,
            closed: false,
        }
    }

    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(b"[")?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> SegmentEncoder for JsonArrayEncoder<W> {
    fn write_segment(&mut self, seg: &Segment) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write segment: encoder is already closed"));
        }

        self.start_if_needed()?;
        if !self.first {
            self.w.write_all(b",")?;
        }
        self.first = false;

        serde_json::to_writer(&mut self.w, seg)?;
        self.w.flush()?;

        Ok(())
    }

    /// Close the array; an encoder that saw no segments still produces `[]`.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.start_if_needed()?;
        self.w.write_all(b"]")?;
        self.w.flush()?;

        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::Word;
    use crate::transcript::read_transcript;

    #[test]
    fn json_array_close_without_segments_emits_empty_array() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        enc.close()?;
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "[]");
        Ok(())
    }

    #[test]
    fn json_array_output_reads_back_as_a_transcript() -> anyhow::Result<()> {
        let segs = vec![
            Segment::new(0.0, 1.0, "hello there")
                .with_words(vec![Word::new(0.0, 0.4, "hello"), Word::new(0.5, 1.0, "there")]),
            Segment::new(1.0, 2.5, "world"),
        ];

        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        for seg in &segs {
            enc.write_segment(seg)?;
        }
        enc.close()?;

        assert_eq!(read_transcript(&out[..])?, segs);
        Ok(())
    }

    #[test]
    fn json_array_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = JsonArrayEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_segment(&Segment::new(0.0, 1.0, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
