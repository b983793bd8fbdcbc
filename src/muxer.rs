//! Thin wrappers around the `ffmpeg` executable.
//!
//! The subtitle engine never calls these; they exist for the command-line tool, which needs to
//! pull audio out of a video and burn finished subtitles back in.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::backend::{TARGET_CHANNELS, TARGET_SAMPLE_RATE};
use crate::color::color_to_hex;
use crate::opts::Style;

const FFMPEG: &str = "ffmpeg";

/// Minimum number of comma-separated fields in a V4+ `Style:` record.
const STYLE_FIELDS: usize = 23;

/// Extract the audio track of `video` as 16 kHz mono 16-bit PCM WAV at `wav_out`.
pub fn extract_audio(video: &Path, wav_out: &Path) -> Result<()> {
    run_ffmpeg(
        Command::new(FFMPEG)
            .args(["-y", "-i"])
            .arg(video)
            .args(["-vn", "-acodec", "pcm_s16le", "-ar"])
            .arg(TARGET_SAMPLE_RATE.to_string())
            .arg("-ac")
            .arg(TARGET_CHANNELS.to_string())
            .arg(wav_out),
        "extract audio",
    )
}

/// Render `subtitles` (any format ffmpeg's `subtitles` filter reads) onto `video`.
pub fn burn_subtitles(video: &Path, subtitles: &Path, output: &Path) -> Result<()> {
    run_ffmpeg(
        Command::new(FFMPEG)
            .args(["-y", "-i"])
            .arg(video)
            .arg("-vf")
            .arg(subtitles_filter(subtitles))
            .arg(output),
        "burn subtitles",
    )
}

/// Convert an SRT file into an ASS script so it can be restyled.
///
/// Returns `false` (after logging) instead of failing: a missing conversion only means the
/// burn step falls back to ffmpeg's default subtitle style.
pub fn convert_srt_to_ass(srt: &Path, ass: &Path) -> bool {
    let res = run_ffmpeg(
        Command::new(FFMPEG).args(["-y", "-i"]).arg(srt).arg(ass),
        "convert SRT to ASS",
    );
    match res {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "subtitle conversion failed");
            false
        }
    }
}

/// Rewrite an ASS file's `Default` style in place (see [`restyle_ass`]).
pub fn restyle_ass_file(path: &Path, style: &Style) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    std::fs::write(path, restyle_ass(&content, style))
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Override font, size and colors of the `Style: Default,...` record.
///
/// Sets the primary colour to the style color, secondary to black, and forces an outlined
/// border (style 1, outline 2, no shadow). Records with too few fields are left as they are.
pub fn restyle_ass(content: &str, style: &Style) -> String {
    content
        .split('\n')
        .map(|line| {
            if !line.starts_with("Style: Default,") {
                return line.to_owned();
            }
            let mut parts: Vec<String> = line.split(',').map(str::to_owned).collect();
            if parts.len() < STYLE_FIELDS {
                return line.to_owned();
            }
            parts[1] = style.font.clone();
            parts[2] = style.font_size.to_string();
            parts[3] = format!("&H{}", color_to_hex(&style.color));
            parts[4] = "&H000000".to_owned();
            parts[15] = "1".to_owned();
            parts[16] = "2".to_owned();
            parts[17] = "0".to_owned();
            parts.join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The `-vf` argument that renders `path`, quoted for ffmpeg's filter syntax.
pub fn subtitles_filter(path: &Path) -> String {
    let escaped = path.to_string_lossy().replace('\\', "/").replace('\'', r"'\''");
    format!("subtitles='{escaped}'")
}

fn run_ffmpeg(cmd: &mut Command, what: &str) -> Result<()> {
    debug!(command = ?cmd, "running ffmpeg to {what}");
    let output = cmd
        .output()
        .with_context(|| format!("failed to run {FFMPEG} to {what}; is it installed?"))?;

    if !output.status.success() {
        bail!(
            "{FFMPEG} failed to {what} (status {:?}): {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
