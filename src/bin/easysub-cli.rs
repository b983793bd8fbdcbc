use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};

use easysub::align::align_script;
use easysub::muxer::{
    burn_subtitles, convert_srt_to_ass, extract_audio, restyle_ass_file,
};
use easysub::pipeline::{build_track, default_output_type, write_track_file};
use easysub::script::read_script_file;
use easysub::srt_reader::read_srt_file;
use easysub::transcript::read_transcript_file;
use easysub::wav::get_samples_from_wav_file;
use easysub::{Mode, Opts, OutputType, Segment, Style, TranscribeOpts, Transcriber, WhisperBackend};

fn main() -> Result<()> {
    easysub::init_logging();
    let params = Params::parse();
    run(&params)
}

#[derive(Parser, Debug)]
#[command(name = "easysub")]
#[command(about = "Generate subtitles for a video and burn them in")]
struct Params {
    /// Input video.
    input: PathBuf,

    /// Output video (defaults to `<input stem>_subtitled.mp4` next to the input).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Subtitle file to write (defaults to the input path with a subtitle extension).
    #[arg(short = 's', long = "srt")]
    srt: Option<PathBuf>,

    /// Existing subtitles (`.srt`), a saved transcript (`.json`) or a plain-text script to align.
    #[arg(short = 'i', long = "input-srt")]
    input_srt: Option<PathBuf>,

    /// Stop after writing the subtitle file.
    #[arg(long = "only-srt", default_value_t = false)]
    only_srt: bool,

    /// Spoken language hint for transcription, or `auto`.
    #[arg(long = "lang", default_value = "es")]
    lang: String,

    /// Path to a whisper.cpp ggml model.
    #[arg(short = 'm', long = "model", default_value = "models/ggml-small.bin")]
    model_path: String,

    #[arg(long = "font", default_value = "Arial")]
    font: String,

    #[arg(long = "size", default_value_t = 36)]
    size: u32,

    /// Text color name (white, black, red, green, blue, yellow, cyan, magenta).
    #[arg(long = "color", default_value = "white")]
    color: String,

    /// Do not transcribe; use `--input-srt` or an existing subtitle file.
    #[arg(long = "skip-transcribe", default_value_t = false)]
    skip_transcribe: bool,

    #[arg(long = "max-chars", default_value_t = Opts::CLI_MAX_CHARS)]
    max_chars: usize,

    #[arg(long = "max-duration", default_value_t = Opts::CLI_MAX_DURATION)]
    max_duration: f64,

    /// One subtitle per word.
    #[arg(long = "word", default_value_t = false)]
    word: bool,

    /// Word-timed subtitles grouped under the character/duration budget.
    #[arg(long = "word-groups", default_value_t = false)]
    word_groups: bool,

    /// Read-along mode: highlight each word as it is spoken (writes ASS).
    #[arg(long = "read", default_value_t = false)]
    read: bool,

    /// Highlight color for read-along mode.
    #[arg(long = "read-color", default_value = "yellow")]
    read_color: String,

    /// Stretch each subtitle until the next one starts.
    #[arg(long = "close-gaps", default_value_t = false)]
    close_gaps: bool,
}

impl Params {
    fn mode(&self) -> Mode {
        if self.read {
            if self.word || self.word_groups {
                warn!("--read takes precedence over --word/--word-groups");
            }
            Mode::Read
        } else if self.word_groups {
            Mode::WordGroups
        } else if self.word {
            Mode::Word
        } else {
            Mode::Whole
        }
    }

    fn opts(&self) -> Opts {
        Opts {
            max_chars: self.max_chars,
            max_duration: self.max_duration,
            mode: self.mode(),
            highlight_color: self.read_color.clone(),
            close_gaps: self.close_gaps,
            style: Style {
                font: self.font.clone(),
                font_size: self.size,
                color: self.color.clone(),
            },
        }
    }

    fn transcribe_opts(&self) -> TranscribeOpts {
        let language = match self.lang.trim() {
            "" | "auto" => None,
            lang => Some(lang.to_owned()),
        };
        TranscribeOpts {
            language,
            translate_to_english: false,
        }
    }

    fn subtitle_path(&self) -> PathBuf {
        self.srt
            .clone()
            .unwrap_or_else(|| self.input.with_extension(OutputType::Srt.extension()))
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_owned());
            self.input.with_file_name(format!("{stem}_subtitled.mp4"))
        })
    }
}

fn run(params: &Params) -> Result<()> {
    if !params.input.exists() {
        bail!("video file not found: {}", params.input.display());
    }

    let opts = params.opts();
    opts.validate()?;

    let Some(segments) = load_segments(params)? else {
        return burn_existing(params);
    };

    let track = build_track(&segments, &opts)?;
    let output_type = default_output_type(opts.mode);
    let subtitle_path = params.subtitle_path().with_extension(output_type.extension());
    write_track_file(&track, &subtitle_path, output_type, &opts.style)?;

    if params.only_srt {
        println!("Subtitles generated in: {}", subtitle_path.display());
        return Ok(());
    }

    let output = params.output_path();
    match output_type {
        OutputType::Ass => burn_subtitles(&params.input, &subtitle_path, &output)?,
        OutputType::Srt | OutputType::Json => {
            burn_styled_srt(&params.input, &subtitle_path, &output, &opts.style)?
        }
    }
    println!("Subtitled video generated in: {}", output.display());
    Ok(())
}

/// Segments to build a track from, or `None` when transcription was skipped and no input
/// file was given.
fn load_segments(params: &Params) -> Result<Option<Vec<Segment>>> {
    let Some(input) = &params.input_srt else {
        if params.skip_transcribe {
            return Ok(None);
        }
        return transcribe(params).map(Some);
    };

    if !input.exists() {
        bail!("input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let segments = match extension.as_str() {
        "srt" => read_srt_file(input)?,
        "json" => read_transcript_file(input)?,
        _ => {
            if params.skip_transcribe {
                bail!("a text script requires transcription; remove --skip-transcribe");
            }
            let script = read_script_file(input)?;
            let recognized = transcribe(params)?;
            align_script(&script, &recognized)
        }
    };
    info!(segments = segments.len(), path = %input.display(), "loaded input segments");
    Ok(Some(segments))
}

fn transcribe(params: &Params) -> Result<Vec<Segment>> {
    let dir = tempfile::tempdir().context("failed to create a temporary directory")?;
    let wav = dir.path().join("audio.wav");
    extract_audio(&params.input, &wav)?;
    let samples = get_samples_from_wav_file(&wav)?;

    let mut backend = WhisperBackend::new(&params.model_path)?;
    let segments = backend.transcribe(&samples, &params.transcribe_opts())?;
    info!(segments = segments.len(), "transcription finished");
    Ok(segments)
}

/// Burn a subtitle file written earlier (by a previous run or by hand).
fn burn_existing(params: &Params) -> Result<()> {
    let srt_path = params.subtitle_path();
    if params.only_srt {
        println!("Subtitles generated in: {}", srt_path.display());
        return Ok(());
    }
    if !srt_path.exists() {
        bail!(
            "nothing to burn: {} does not exist and transcription was skipped",
            srt_path.display()
        );
    }

    let output = params.output_path();
    burn_styled_srt(&params.input, &srt_path, &output, &params.opts().style)?;
    println!("Subtitled video generated in: {}", output.display());
    Ok(())
}

/// Convert to ASS so the requested style applies, falling back to burning the SRT as is.
fn burn_styled_srt(video: &Path, srt: &Path, output: &Path, style: &Style) -> Result<()> {
    let ass = srt.with_extension(OutputType::Ass.extension());
    if convert_srt_to_ass(srt, &ass) {
        restyle_ass_file(&ass, style)?;
        burn_subtitles(video, &ass, output)
    } else {
        burn_subtitles(video, srt, output)
    }
}
