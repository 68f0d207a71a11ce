use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads the whole log file as text. Invalid UTF-8 sequences are dropped.
pub fn load(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::LogNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| Error::ReadLog {
        path: path.to_path_buf(),
        source,
    })?;

    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0usize;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }

    if dropped > 0 {
        warn!(path = %path.display(), dropped, "dropped undecodable bytes from log");
    }
    debug!(path = %path.display(), bytes = bytes.len(), "loaded log file");

    Ok(text)
}
