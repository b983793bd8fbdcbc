//! `easysub` turns timestamped transcriptions into subtitle tracks.
//!
//! This crate provides:
//! - A pure segmentation and re-timing engine (chunking under character/duration budgets,
//!   word extraction, read-along highlighting, gap closing)
//! - Script alignment against recognized word timing
//! - Readers for SRT files, plain-text scripts and JSON transcripts
//! - Streaming encoders for SRT, ASS and JSON output
//! - Optional whisper.cpp transcription and ffmpeg helpers used by the CLI
//!
//! The engine itself does no I/O: [`pipeline::build_track`] maps segments plus [`Opts`] to
//! segments, so independent inputs can be processed on separate threads without coordination.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// Segment data structures.
pub mod segments;
pub mod token;

// The engine.
pub mod align;
pub mod chunker;
pub mod gaps;
pub mod read_along;
pub mod words;

// Text formats shared by the engine and the encoders.
pub mod color;
pub mod markup;
pub mod timestamp;

// Input readers.
pub mod script;
pub mod srt_reader;
pub mod transcript;

// Output selection and encoder interfaces.
pub mod output_type;
pub mod segment_encoder;

// Output encoders that serialize segments into subtitle formats.
pub mod ass_encoder;
pub mod json_array_encoder;
pub mod srt_encoder;

// Collaborators: speech recognition and the ffmpeg muxer.
pub mod backend;
pub mod backends;
pub mod muxer;
#[cfg(feature = "whisper")]
pub mod wav;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use backend::{TranscribeOpts, Transcriber};
#[cfg(feature = "whisper")]
pub use backends::whisper::WhisperBackend;
pub use error::{Error, Result};
pub use opts::{Mode, Opts, Style};
pub use output_type::OutputType;
pub use pipeline::{build_track, write_track};
pub use segments::{Segment, Word};

/// Initialize structured logging (JSON to stderr, filtered by `EASYSUB_LOG`).
#[cfg(feature = "logging")]
pub fn init_logging() {
    logging::init();
}
