use std::io::{Read, Seek};
use std::path::Path;

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader};

use crate::backend::{TARGET_CHANNELS, TARGET_SAMPLE_RATE};

/// Load 16-bit PCM WAV audio and return mono samples normalized to `[-1.0, 1.0]`.
///
/// The input must already be mono at [`TARGET_SAMPLE_RATE`]; that is exactly what
/// [`crate::muxer::extract_audio`] produces.
pub fn get_samples_from_wav_reader<R>(reader: R) -> Result<Vec<f32>>
where
    R: Read + Seek,
{
    let mut reader = WavReader::new(reader).context("failed to read WAV data from reader")?;
    let spec = reader.spec();

    if spec.channels != TARGET_CHANNELS {
        bail!(
            "expected mono WAV (1 channel), got {} channels",
            spec.channels
        );
    }
    if spec.sample_rate != TARGET_SAMPLE_RATE {
        bail!(
            "expected {} Hz sample rate, got {} Hz",
            TARGET_SAMPLE_RATE,
            spec.sample_rate
        );
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        bail!(
            "expected 16-bit integer PCM, got {} bits ({:?})",
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    reader
        .samples::<i16>()
        .map(|sample| -> Result<f32> {
            let pcm = sample.context("failed to read WAV sample")?;
            Ok(pcm as f32 / i16::MAX as f32)
        })
        .collect()
}

/// [`get_samples_from_wav_reader`] over a file on disk.
pub fn get_samples_from_wav_file(path: &Path) -> Result<Vec<f32>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open WAV file '{}'", path.display()))?;
    get_samples_from_wav_reader(std::io::BufReader::new(file))
}
