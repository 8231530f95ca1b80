//! Configuration: replacement-table overlays and TTS defaults.
//!
//! The replacement table is resolved once per run by layering JSON
//! files over the built-in defaults, in increasing priority:
//! built-ins, `novel_cli_replacements.json` in the home directory, the
//! same file in the current directory, then an explicitly supplied
//! path. Each layer wins on key collision. A malformed or unreadable
//! layer is logged and skipped rather than aborting the run.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::text::corrector::ReplacementTable;

/// Overlay file name looked up in the home and current directories.
pub const REPLACEMENTS_FILE_NAME: &str = "novel_cli_replacements.json";

/// OCR/typo fixes that ship with the tool. 幺-for-么 is the most common
/// artifact in scraped Chinese novel text.
const BUILTIN_REPLACEMENTS: &[(&str, &str)] = &[
    ("这幺", "这么"),
    ("那幺", "那么"),
    ("什幺", "什么"),
    ("怎幺", "怎么"),
];

/// TTS endpoint used when `NOVEL_CLI_TTS_API` is unset.
const DEFAULT_TTS_API: &str = "http://127.0.0.1:9880/tts";

/// Resolve the replacement table for this run.
pub fn load_replacements(explicit: Option<&Path>) -> ReplacementTable {
    let mut table: ReplacementTable = BUILTIN_REPLACEMENTS
        .iter()
        .map(|(f, t)| (f.to_string(), t.to_string()))
        .collect();

    for path in overlay_paths(explicit) {
        overlay_file(&mut table, &path);
    }

    table
}

fn overlay_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(REPLACEMENTS_FILE_NAME));
    }
    if let Ok(cwd) = env::current_dir() {
        paths.push(cwd.join(REPLACEMENTS_FILE_NAME));
    }
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    paths
}

/// Merge one JSON overlay into `table`. Missing files are silently
/// skipped; unreadable or malformed files are logged at warn level and
/// skipped so the lower-priority layers still apply.
fn overlay_file(table: &mut ReplacementTable, path: &Path) {
    if !path.exists() {
        return;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("skipping replacement config {}: {}", path.display(), e);
            return;
        }
    };

    // preserve_order keeps the file's rule order.
    let parsed: Value = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("skipping malformed replacement config {}: {}", path.display(), e);
            return;
        }
    };

    let Some(object) = parsed.as_object() else {
        warn!(
            "skipping replacement config {}: expected a JSON object",
            path.display()
        );
        return;
    };

    let mut applied = 0usize;
    for (from, to) in object {
        match to.as_str() {
            Some(to) => {
                table.insert(from.clone(), to.to_string());
                applied += 1;
            }
            None => warn!(
                "ignoring non-string replacement for {:?} in {}",
                from,
                path.display()
            ),
        }
    }
    debug!("applied {} replacement(s) from {}", applied, path.display());
}

/// TTS endpoint: `NOVEL_CLI_TTS_API` or the local GPT-SoVITS default.
pub fn default_tts_api() -> String {
    env::var("NOVEL_CLI_TTS_API").unwrap_or_else(|_| DEFAULT_TTS_API.to_string())
}

/// Reference-audio path on the TTS server, from `NOVEL_CLI_REF_AUDIO`.
pub fn default_ref_audio() -> Option<String> {
    env::var("NOVEL_CLI_REF_AUDIO").ok().filter(|s| !s.is_empty())
}
