use std::path::Path;

use crate::Result;
use crate::error::Error;

/// Read a plain-text script and collapse its whitespace (see [`normalize_script`]).
pub fn read_script_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::msg(format!("failed to read script '{}': {e}", path.display())))?;
    Ok(normalize_script(&raw))
}

/// Collapse every run of whitespace (line breaks included) into a single space and trim.
pub fn normalize_script(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
