//! Volume separator insertion at a fixed chapter cadence.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use log::info;

use crate::encoding::read_document;
use crate::fsutil::AtomicWriter;
use crate::text::ChapterPattern;

/// Replay the document verbatim, inserting a separator block before
/// every `step`-th chapter heading. The block is a blank line, the
/// volume label, and another blank line; volume numbers start at 1.
///
/// This deliberately does not use the segmenter: every original line
/// must survive unchanged, including anything before the first chapter.
pub fn add_markers(input: &Path, step: i64, pattern: &ChapterPattern) -> Result<PathBuf> {
    // Rejected before any file is touched: step 0 would divide by zero
    // and a negative step would put a separator before every chapter.
    if step <= 0 {
        bail!("Volume step must be positive, got {step}");
    }
    let step = step as usize;

    let text = read_document(input)?;

    let dest = output_path(input);
    let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
    let mut writer = AtomicWriter::new(dir.unwrap_or(Path::new(".")))?;

    let mut chapter_count = 0usize;
    for line in text.split_inclusive('\n') {
        if pattern.is_boundary(line) {
            if chapter_count % step == 0 {
                let volume = chapter_count / step + 1;
                write!(writer, "\n第{volume}卷\n\n")?;
            }
            chapter_count += 1;
        }
        writer.write_all(line.as_bytes())?;
    }

    writer.commit(&dest)?;
    info!(
        "marked {} chapter(s) in {}",
        chapter_count,
        dest.display()
    );
    Ok(dest)
}

fn output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_with_volumes{ext}"))
}
