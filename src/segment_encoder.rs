use crate::Result;
use crate::segments::Segment;

/// A streaming sink for finished subtitle segments.
///
/// Encoders write each segment as it arrives. `close` finalizes the output (trailers, flush) and
/// is idempotent; writing after `close` is an error.
pub trait SegmentEncoder {
    fn write_segment(&mut self, seg: &Segment) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
