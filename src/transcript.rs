//! Loading transcriber output saved as JSON.
//!
//! The accepted shape is an array of `{ "start", "end", "text", "words"? }` objects, with
//! words shaped `{ "start", "end", "word" }`. This is also what
//! [`crate::json_array_encoder::JsonArrayEncoder`] writes, so a transcription can be saved
//! once and re-chunked many times.

use std::io::Read;
use std::path::Path;

use crate::Result;
use crate::error::Error;
use crate::segments::Segment;

pub fn read_transcript_file(path: impl AsRef<Path>) -> Result<Vec<Segment>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| Error::msg(format!("failed to open '{}': {e}", path.display())))?;
    read_transcript(std::io::BufReader::new(file))
}

pub fn read_transcript<R: Read>(r: R) -> Result<Vec<Segment>> {
    let segments: Vec<Segment> = serde_json::from_reader(r)?;
    Ok(segments)
}
