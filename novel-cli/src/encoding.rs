//! Input decoding: UTF-8 with a GB18030 fallback.
//!
//! Scraped Chinese novel files are either UTF-8 or a legacy mainland
//! encoding. The probe is best-effort: a buffer that validates as UTF-8
//! is taken as UTF-8, anything else is decoded as GB18030 (a superset
//! of GBK and GB2312).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::GB18030;
use log::debug;

/// Read a novel file and decode it to a `String`.
///
/// A missing or unreadable file is a fatal input error, surfaced before
/// any output is produced.
pub fn read_document(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(decode(bytes, path))
}

fn decode(bytes: Vec<u8>, path: &Path) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            debug!("{}: not valid UTF-8, decoding as GB18030", path.display());
            let bytes = err.into_bytes();
            let (text, _, _) = GB18030.decode(&bytes);
            text.into_owned()
        }
    }
}
