//! Audio synthesis: feed extracted chapters to the TTS endpoint one at
//! a time and collect the audio files in a sibling directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{error, info};
use tts_client::{SynthesisRequest, TtsClient};

use crate::encoding::read_document;
use crate::fsutil::sanitize_filename;
use crate::text::segmenter::Chapters;
use crate::text::ChapterPattern;

/// Per-run synthesis summary.
#[derive(Debug, Default)]
pub struct SynthesisReport {
    pub completed: usize,
    pub failed: usize,
}

/// Synthesize audio for up to `count` chapters starting at
/// `start_locator`, writing `<ordinal>_<title>.<ext>` files into
/// `<stem>_tts/` next to the input.
///
/// Chapters whose output file already exists are skipped, so an
/// interrupted run can be resumed. A failed chapter is logged and
/// counted; the run continues with the next chapter.
pub fn synthesize_chapters(
    input: &Path,
    start_locator: Option<&str>,
    count: i64,
    pattern: &ChapterPattern,
    api_url: &str,
    ref_audio: &str,
) -> Result<(PathBuf, SynthesisReport)> {
    let text = read_document(input)?;
    let limit = (count > 0).then_some(count as usize);

    let output_dir = output_dir(input);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let client = TtsClient::new(api_url)?;
    let mut report = SynthesisReport::default();

    for chapter in Chapters::new(&text, pattern, start_locator, limit) {
        let request = SynthesisRequest::new(chapter.body, ref_audio);
        let file = output_dir.join(format!(
            "{:04}_{}.{}",
            chapter.ordinal,
            sanitize_filename(&chapter.title),
            request.media_type
        ));

        if file.exists() {
            info!("skipping existing: {}", chapter.title);
            report.completed += 1;
            continue;
        }

        match client.synthesize(&request) {
            Ok(audio) => {
                fs::write(&file, &audio)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
                report.completed += 1;
                info!("[{}] completed: {}", report.completed, chapter.title);
            }
            Err(e) => {
                report.failed += 1;
                error!("failed: {}: {}", chapter.title, e);
            }
        }
    }

    info!(
        "synthesis finished: {} completed, {} failed",
        report.completed, report.failed
    );
    Ok((output_dir, report))
}

fn output_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_tts"))
}
