//! Whole-session save files.
//!
//! The file holds two lines:
//! - Line 1: header with `format_version` and the SHA-256 of line 2.
//! - Line 2: the serialized `Engine`.
//!
//! Writes go through a sibling temp file and a rename, so a crash mid-write
//! leaves the previous save intact.

use std::fs;
use std::io;
use std::path::Path;
use std::str;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::engine::Engine;

pub const FORMAT_VERSION: u16 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct SaveHeader {
    format_version: u16,
    sha256_hex: String,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save format version {found}")]
    UnsupportedVersion { found: u16 },
    #[error("save payload checksum mismatch")]
    ChecksumMismatch,
    #[error("save file is truncated")]
    Truncated,
}

fn payload_sha256(payload: &str) -> String {
    let digest = Sha256::digest(payload.as_bytes());
    format!("{digest:064x}")
}

pub fn to_bytes(engine: &Engine) -> Result<Vec<u8>, SaveError> {
    let payload = serde_json::to_string(engine)?;
    let header =
        SaveHeader { format_version: FORMAT_VERSION, sha256_hex: payload_sha256(&payload) };
    let mut out = serde_json::to_string(&header)?;
    out.push('\n');
    out.push_str(&payload);
    out.push('\n');
    Ok(out.into_bytes())
}

pub fn from_bytes(bytes: &[u8]) -> Result<Engine, SaveError> {
    let text = str::from_utf8(bytes).map_err(|_| SaveError::Truncated)?;
    let mut lines = text.lines();
    let header_line = lines.next().ok_or(SaveError::Truncated)?;
    let payload = lines.next().ok_or(SaveError::Truncated)?;

    let header: SaveHeader = serde_json::from_str(header_line)?;
    if header.format_version != FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion { found: header.format_version });
    }
    if payload_sha256(payload) != header.sha256_hex {
        return Err(SaveError::ChecksumMismatch);
    }
    Ok(serde_json::from_str(payload)?)
}

pub fn write_atomic(path: &Path, engine: &Engine) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = to_bytes(engine)?;
    let tmp_path = path.with_extension("sav.tmp");
    fs::write(&tmp_path, &bytes)?;
    fs::rename(&tmp_path, path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "session saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<Engine, SaveError> {
    let bytes = fs::read(path)?;
    let engine = from_bytes(&bytes)?;
    debug!(path = %path.display(), floor = engine.current_floor(), "session loaded");
    Ok(engine)
}
