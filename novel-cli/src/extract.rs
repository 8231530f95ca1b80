//! Chapter extraction: select a bounded run of chapters and write them
//! to a new sibling file named after the extracted titles.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::encoding::read_document;
use crate::fsutil::{sanitize_filename, AtomicWriter};
use crate::text::segmenter::Chapters;
use crate::text::ChapterPattern;

/// Extract up to `count` chapters starting at the first boundary line
/// whose title contains `start_locator` (or the first boundary line at
/// all when `None`).
///
/// Returns `Ok(None)` when the locator never matched: no output file is
/// produced and the temporary file is discarded. `count <= 0` means
/// unbounded.
pub fn extract(
    input: &Path,
    start_locator: Option<&str>,
    count: i64,
    pattern: &ChapterPattern,
) -> Result<Option<PathBuf>> {
    let text = read_document(input)?;
    let limit = (count > 0).then_some(count as usize);

    let dir = input.parent().filter(|p| !p.as_os_str().is_empty());
    let mut writer = AtomicWriter::new(dir.unwrap_or(Path::new(".")))?;

    let mut first_title: Option<String> = None;
    let mut last_title = String::new();
    for chapter in Chapters::new(&text, pattern, start_locator, limit) {
        writer.write_all(chapter.body.as_bytes())?;
        if first_title.is_none() {
            first_title = Some(chapter.title.clone());
        }
        last_title = chapter.title;
    }

    // Dropping the writer here removes the temporary file.
    let Some(first_title) = first_title else {
        return Ok(None);
    };

    let dest = input.with_file_name(output_name(input, &first_title, &last_title, count));
    writer.commit(&dest)?;
    info!("extracted chapters to {}", dest.display());
    Ok(Some(dest))
}

/// `<stem>_<start><ext>` for a single chapter or identical endpoint
/// titles, `<stem>_<start>_<end><ext>` otherwise.
fn output_name(input: &Path, first_title: &str, last_title: &str, count: i64) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let safe_start = sanitize_filename(first_title);
    let safe_end = sanitize_filename(last_title);

    if safe_start == safe_end || count == 1 {
        format!("{stem}_{safe_start}{ext}")
    } else {
        format!("{stem}_{safe_start}_{safe_end}{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "Preface\n\n第1章 One\nContent 1.\n\n第2章 Two\nContent 2.\n\n第3章 Three\nContent 3.\n";

    fn write_sample(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("novel.txt");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    fn pattern() -> &'static ChapterPattern {
        ChapterPattern::default_pattern()
    }

    #[test]
    fn test_extract_single_chapter() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);

        let output = extract(&input, Some("第2章"), 1, pattern()).unwrap().unwrap();
        let content = fs::read_to_string(&output).unwrap();

        assert!(content.contains("第2章"));
        assert!(content.contains("Content 2."));
        assert!(!content.contains("第1章"));
        assert!(!content.contains("第3章"));
        assert_eq!(
            output.file_name().unwrap().to_string_lossy(),
            "novel_第2章Two.txt"
        );
    }

    #[test]
    fn test_extract_range_names_both_endpoints() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);

        let output = extract(&input, None, 2, pattern()).unwrap().unwrap();
        assert_eq!(
            output.file_name().unwrap().to_string_lossy(),
            "novel_第1章One_第2章Two.txt"
        );
        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("Content 1."));
        assert!(content.contains("Content 2."));
        assert!(!content.contains("Content 3."));
    }

    #[test]
    fn test_extract_unbounded() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);

        let output = extract(&input, None, 0, pattern()).unwrap().unwrap();
        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("Content 1."));
        assert!(content.contains("Content 3."));
        assert!(!content.contains("Preface"));
    }

    #[test]
    fn test_start_not_found_produces_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);
        let before = fs::read(&input).unwrap();

        let result = extract(&input, Some("第99章"), 1, pattern()).unwrap();
        assert!(result.is_none());

        // Input untouched, no output and no leftover temp file.
        assert_eq!(fs::read(&input).unwrap(), before);
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("novel.txt")]);
    }

    #[test]
    fn test_never_overwrites_input() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);

        let output = extract(&input, None, 1, pattern()).unwrap().unwrap();
        assert_ne!(output, input);
        assert_eq!(fs::read_to_string(&input).unwrap(), SAMPLE);
    }
}
