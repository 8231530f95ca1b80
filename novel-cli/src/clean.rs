//! The cleaning pipeline: typo correction followed by duplicate-heading
//! removal, written to a `_clean` sibling file.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::encoding::read_document;
use crate::fsutil::AtomicWriter;
use crate::text::corrector::{correct_lines, ReplacementTable};
use crate::text::dedup::deduplicate_lines;
use crate::text::ChapterPattern;

/// Correct every line with `table`, drop duplicated adjacent chapter
/// headings, and publish the result as `<stem>_clean<ext>`. The input
/// file is never modified; output is always UTF-8.
pub fn clean(input: &Path, pattern: &ChapterPattern, table: &ReplacementTable) -> Result<PathBuf> {
    let text = read_document(input)?;

    let lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    let before = lines.len();

    let corrected = correct_lines(lines, table);
    let cleaned = deduplicate_lines(corrected, pattern);
    let removed = before - cleaned.len();

    let dest = output_path(input);
    let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
    let mut writer = AtomicWriter::new(dir.unwrap_or(Path::new(".")))?;
    for line in &cleaned {
        writer.write_all(line.as_bytes())?;
    }
    writer.commit(&dest)?;

    info!(
        "cleaned {} ({} duplicate heading(s) removed)",
        dest.display(),
        removed
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
    input.with_file_name(format!("{stem}_clean{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn builtin_table() -> ReplacementTable {
        crate::config::load_replacements(None)
    }

    #[test]
    fn test_correction_and_deduplication() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("novel.txt");
        let content = concat!(
            "第1章 开始\n",
            "这幺好的天气，那幺多人。\n",
            "第2章 中间\n",
            "第2章 中间\n",
            "什幺是快乐？怎幺寻找？\n",
            "第3章 结束\n",
            "正常内容。\n",
        );
        fs::write(&input, content).unwrap();

        let output = clean(&input, ChapterPattern::default_pattern(), &builtin_table()).unwrap();
        let result = fs::read_to_string(&output).unwrap();

        assert!(result.contains("这么好的天气"));
        assert!(!result.contains("这幺"));
        assert!(result.contains("那么多人"));
        assert!(result.contains("什么是快乐"));
        assert!(result.contains("怎么寻找"));
        assert_eq!(result.matches("第2章").count(), 1);
    }

    #[test]
    fn test_indented_duplicate_removed() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("novel.txt");
        fs::write(&input, "第1章 A\n内容。\n   第1章 A\n第2章 B\n").unwrap();

        let output = clean(&input, ChapterPattern::default_pattern(), &builtin_table()).unwrap();
        let result = fs::read_to_string(&output).unwrap();

        assert_eq!(result, "第1章 A\n内容。\n第2章 B\n");
    }

    #[test]
    fn test_output_name_and_input_untouched() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("novel.txt");
        fs::write(&input, "第1章 A\n").unwrap();

        let output = clean(&input, ChapterPattern::default_pattern(), &builtin_table()).unwrap();
        assert_eq!(
            output.file_name().unwrap().to_string_lossy(),
            "novel_clean.txt"
        );
        assert_eq!(fs::read_to_string(&input).unwrap(), "第1章 A\n");
    }

    #[test]
    fn test_custom_pattern_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("novel.txt");
        fs::write(&input, "第1章 A\n第1章 A\n第2章 B\n").unwrap();

        let pattern = ChapterPattern::new(r"第\d+章").unwrap();
        let output = clean(&input, &pattern, &ReplacementTable::new()).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "第1章 A\n第2章 B\n"
        );
    }
}
