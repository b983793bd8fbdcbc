use crate::Result;
use crate::segments::Segment;

/// Sample rate transcribers consume (Hz).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Channel count transcribers consume.
pub const TARGET_CHANNELS: u16 = 1;

/// Options passed through to the speech recognizer. Opaque to the subtitle engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscribeOpts {
    /// Optional language hint (e.g. `"en"`, `"es"`). `None` lets the recognizer detect it.
    pub language: Option<String>,

    /// Translate speech to English instead of transcribing verbatim.
    pub translate_to_english: bool,
}

/// Pluggable speech recognizer.
///
/// A transcriber turns mono `f32` samples at 16 kHz into chronologically ordered segments,
/// ideally carrying per-word timing so read-along output follows the speech exactly.
pub trait Transcriber {
    fn transcribe(&mut self, samples_16k_mono: &[f32], opts: &TranscribeOpts)
    -> Result<Vec<Segment>>;
}
