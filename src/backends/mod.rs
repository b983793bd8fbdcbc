/// Built-in ASR backends.
#[cfg(feature = "whisper")]
pub mod whisper;
