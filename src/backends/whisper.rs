//! Speech recognition with whisper.cpp through `whisper-rs`.
//!
//! Token timestamps are always requested so every segment comes back with per-word timing,
//! which is what read-along output and script alignment need.

use std::os::raw::{c_char, c_void};
use std::sync::Once;

use anyhow::Context;
use tracing::debug;
use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperSegment,
};

use crate::Result;
use crate::error::Error;
use crate::backend::{TranscribeOpts, Transcriber};
use crate::segments::{Segment, Word};
use crate::token::{Token, centiseconds_to_seconds, tokens_to_words};

/// Built-in transcriber powered by `whisper-rs` / `whisper.cpp`.
pub struct WhisperBackend {
    ctx: WhisperContext,
}

impl WhisperBackend {
    /// Load a ggml model from disk. Loading is expensive; reuse the backend across inputs.
    pub fn new(model_path: &str) -> Result<Self> {
        if model_path.trim().is_empty() {
            return Err(Error::config("a whisper model path must be provided"));
        }
        silence_whisper_logging();

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .with_context(|| format!("failed to load model from path: {model_path}"))?;
        Ok(Self { ctx })
    }

    /// Access the underlying Whisper context.
    pub fn context(&self) -> &WhisperContext {
        &self.ctx
    }
}

impl Transcriber for WhisperBackend {
    fn transcribe(
        &mut self,
        samples_16k_mono: &[f32],
        opts: &TranscribeOpts,
    ) -> Result<Vec<Segment>> {
        if samples_16k_mono.is_empty() {
            return Ok(Vec::new());
        }

        let mut state = self
            .ctx
            .create_state()
            .context("failed to create whisper state")?;
        state
            .full(build_full_params(opts), samples_16k_mono)
            .context("failed to run whisper full()")?;

        let mut segments = Vec::new();
        for whisper_segment in state.as_iter() {
            segments.push(to_segment(&whisper_segment)?);
        }
        debug!(segments = segments.len(), "whisper transcription finished");
        Ok(segments)
    }
}

fn build_full_params(opts: &TranscribeOpts) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(num_cpus::get() as i32);
    params.set_translate(opts.translate_to_english);
    params.set_language(opts.language.as_deref());
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params.set_token_timestamps(true);

    params
}

fn to_segment(segment: &WhisperSegment) -> anyhow::Result<Segment> {
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .trim()
        .to_owned();
    let words = tokens_to_words(&tokens_from_segment(segment)?);

    // Word timing trims the leading/trailing silence whisper often includes in a segment.
    let (start_seconds, end_seconds) = match (words.first(), words.last()) {
        (Some(first), Some(last)) if last.end_seconds >= first.start_seconds => {
            (first.start_seconds, last.end_seconds)
        }
        _ => (
            centiseconds_to_seconds(segment.start_timestamp()),
            centiseconds_to_seconds(segment.end_timestamp()),
        ),
    };

    Ok(Segment {
        start_seconds,
        end_seconds,
        text,
        words: clamp_words(words, start_seconds, end_seconds),
    })
}

/// Keep words inside their segment and in non-decreasing order; whisper's token timestamps
/// are occasionally a centisecond out of step.
fn clamp_words(words: Vec<Word>, start: f64, end: f64) -> Vec<Word> {
    let mut floor = start;
    words
        .into_iter()
        .map(|mut w| {
            w.start_seconds = w.start_seconds.clamp(floor, end);
            w.end_seconds = w.end_seconds.clamp(w.start_seconds, end);
            floor = w.end_seconds;
            w
        })
        .collect()
}

fn tokens_from_segment(segment: &WhisperSegment) -> anyhow::Result<Vec<Token>> {
    let token_count = usize::try_from(segment.n_tokens())
        .context("segment reported a negative token count")?;

    (0..token_count)
        .map(|idx| {
            let token = segment
                .get_token(idx as i32)
                .with_context(|| format!("failed to get token {idx} from segment"))?;
            let data = token.token_data();
            let text = token
                .to_str()
                .with_context(|| format!("failed to get token text at index {idx}"))?
                .to_owned();
            Ok(Token {
                start_seconds: centiseconds_to_seconds(data.t0),
                end_seconds: centiseconds_to_seconds(data.t1),
                text,
                probability: data.p,
            })
        })
        .collect()
}

unsafe extern "C" fn discard_whisper_log(
    _level: u32,
    _c_msg: *const c_char,
    _user_data: *mut c_void,
) {
}

/// whisper.cpp prints model-loading chatter straight to stderr; route it nowhere, once.
fn silence_whisper_logging() {
    static INIT: Once = Once::new();

    INIT.call_once(|| unsafe {
        whisper_rs::set_log_callback(Some(discard_whisper_log), std::ptr::null_mut());
    });
}
