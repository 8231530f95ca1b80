//! Text processing core: chapter detection, segmentation, correction,
//! and duplicate-heading removal.

pub mod corrector;
pub mod dedup;
pub mod segmenter;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Default heading pattern: optional indentation, 第, arabic or CJK
/// numerals, 章, then whitespace or end of line.
pub const DEFAULT_CHAPTER_PATTERN: &str = r"^\s*第[0-9零一二三四五六七八九十百千]+章(?:\s|$)";

static DEFAULT_PATTERN: Lazy<ChapterPattern> = Lazy::new(|| {
    ChapterPattern::new(DEFAULT_CHAPTER_PATTERN).expect("default chapter pattern should compile")
});

/// A compiled chapter-heading pattern, anchored at line start.
///
/// Compiled once per run and shared by every loop that classifies lines,
/// so large documents never pay for recompilation.
#[derive(Debug)]
pub struct ChapterPattern {
    regex: Regex,
}

impl ChapterPattern {
    /// Compile a heading pattern. Invalid syntax is a configuration
    /// error and is reported before any file is read.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid chapter pattern: {pattern}"))?;
        Ok(Self { regex })
    }

    /// Shared instance of [`DEFAULT_CHAPTER_PATTERN`].
    pub fn default_pattern() -> &'static ChapterPattern {
        &DEFAULT_PATTERN
    }

    /// Does this line start a new chapter? Matching is anchored at the
    /// start of the line; a match further in does not count.
    pub fn is_boundary(&self, line: &str) -> bool {
        self.regex.find(line).is_some_and(|m| m.start() == 0)
    }

    /// The chapter title for a boundary line: the full line with
    /// surrounding whitespace stripped. Only meaningful when
    /// [`is_boundary`](Self::is_boundary) returned true.
    pub fn title_of<'a>(&self, line: &'a str) -> &'a str {
        line.trim()
    }
}

/// Number of leading whitespace characters on a line.
pub fn leading_indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
