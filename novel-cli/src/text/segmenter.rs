//! Streaming chapter segmentation.
//!
//! [`Chapters`] is a single-pass iterator that classifies every line as
//! either a chapter boundary or body text and groups the lines into
//! (title, body, ordinal) tuples. Once the requested number of chapters
//! has been emitted it stops consuming input, so asking for the first
//! few chapters of a very large document never scans the remainder.

use super::ChapterPattern;

/// One extracted chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// The full boundary line, stripped of surrounding whitespace.
    pub title: String,
    /// All lines from the boundary line up to (excluding) the next
    /// boundary, with original line terminators preserved.
    pub body: String,
    /// 1-based position among the *emitted* chapters, not among all
    /// chapters in the document.
    pub ordinal: usize,
}

enum State {
    SeekingStart,
    Collecting,
    Done,
}

/// Lazy iterator over the chapters of a document.
pub struct Chapters<'a> {
    lines: std::str::SplitInclusive<'a, char>,
    pattern: &'a ChapterPattern,
    start_locator: Option<&'a str>,
    limit: Option<usize>,
    state: State,
    emitted: usize,
    title: String,
    body: String,
}

impl<'a> Chapters<'a> {
    /// Create a segmenter over `text`.
    ///
    /// * `start_locator`: `None` starts at the first boundary line;
    ///   `Some(s)` starts at the first boundary line whose title
    ///   contains `s`. If it never matches, the iterator is empty.
    /// * `limit`: `None` is unbounded, otherwise at most `limit`
    ///   chapters are emitted.
    pub fn new(
        text: &'a str,
        pattern: &'a ChapterPattern,
        start_locator: Option<&'a str>,
        limit: Option<usize>,
    ) -> Self {
        Self {
            lines: text.split_inclusive('\n'),
            pattern,
            start_locator,
            limit,
            state: State::SeekingStart,
            emitted: 0,
            title: String::new(),
            body: String::new(),
        }
    }

    fn take_chapter(&mut self) -> Chapter {
        self.emitted += 1;
        Chapter {
            title: std::mem::take(&mut self.title),
            body: std::mem::take(&mut self.body),
            ordinal: self.emitted,
        }
    }
}

impl Iterator for Chapters<'_> {
    type Item = Chapter;

    fn next(&mut self) -> Option<Chapter> {
        if matches!(self.state, State::Done) {
            return None;
        }

        while let Some(line) = self.lines.next() {
            let is_boundary = self.pattern.is_boundary(line);

            match self.state {
                State::SeekingStart => {
                    if is_boundary {
                        let title = self.pattern.title_of(line);
                        let starts_here = match self.start_locator {
                            None => true,
                            Some(locator) => title.contains(locator),
                        };
                        if starts_here {
                            self.state = State::Collecting;
                            self.title = title.to_string();
                            self.body = line.to_string();
                        }
                    }
                    // Body text before the start is discarded.
                }
                State::Collecting => {
                    if is_boundary {
                        let chapter = self.take_chapter();
                        if self.limit.is_some_and(|n| self.emitted >= n) {
                            // Short-circuit: do not buffer the new
                            // chapter or read any further lines.
                            self.state = State::Done;
                        } else {
                            self.title = self.pattern.title_of(line).to_string();
                            self.body = line.to_string();
                        }
                        return Some(chapter);
                    }
                    self.body.push_str(line);
                }
                State::Done => unreachable!(),
            }
        }

        // End of document: flush the chapter still being collected.
        if matches!(self.state, State::Collecting) {
            self.state = State::Done;
            return Some(self.take_chapter());
        }

        self.state = State::Done;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Preface\nLine 1\n\n第1章 Chapter One\nContent of chapter 1.\nMore content.\n\n第2章 Chapter Two\nContent of chapter 2.\n\n第3章 Chapter Three\nContent of chapter 3.\n";

    fn pattern() -> &'static ChapterPattern {
        ChapterPattern::default_pattern()
    }

    #[test]
    fn test_iterates_all_chapters() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), None, None).collect();
        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].title, "第1章 Chapter One");
        assert!(chapters[0].body.contains("Content of chapter 1."));
        assert_eq!(chapters[0].ordinal, 1);
        assert_eq!(chapters[2].ordinal, 3);
    }

    #[test]
    fn test_preface_is_discarded() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), None, None).collect();
        assert!(!chapters[0].body.contains("Preface"));
    }

    #[test]
    fn test_body_keeps_line_terminators() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), None, None).collect();
        assert_eq!(
            chapters[0].body,
            "第1章 Chapter One\nContent of chapter 1.\nMore content.\n\n"
        );
    }

    #[test]
    fn test_count_limit() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), None, Some(2)).collect();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[1].title, "第2章 Chapter Two");
    }

    #[test]
    fn test_limit_stops_consuming_input() {
        let mut iter = Chapters::new(SAMPLE, pattern(), None, Some(1));
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        // The line after the second boundary was never read.
        let remaining: String = iter.lines.collect();
        assert!(remaining.contains("Content of chapter 2."));
    }

    #[test]
    fn test_start_locator() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), Some("第2章"), None).collect();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "第2章 Chapter Two");
        assert_eq!(chapters[0].ordinal, 1);
    }

    #[test]
    fn test_start_locator_never_matches() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), Some("第99章"), None).collect();
        assert!(chapters.is_empty());
    }

    #[test]
    fn test_final_chapter_flushed_at_eof() {
        let chapters: Vec<_> = Chapters::new(SAMPLE, pattern(), Some("第3章"), None).collect();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].body, "第3章 Chapter Three\nContent of chapter 3.\n");
    }

    #[test]
    fn test_no_boundaries_yields_nothing() {
        let chapters: Vec<_> = Chapters::new("just\nbody\ntext\n", pattern(), None, None).collect();
        assert!(chapters.is_empty());
    }

    #[test]
    fn test_unbounded_count_equals_boundary_count() {
        let boundaries = SAMPLE
            .split_inclusive('\n')
            .filter(|l| pattern().is_boundary(l))
            .count();
        let chapters = Chapters::new(SAMPLE, pattern(), None, None).count();
        assert_eq!(chapters, boundaries);
    }

    #[test]
    fn test_document_without_trailing_newline() {
        let text = "第1章 A\nbody";
        let chapters: Vec<_> = Chapters::new(text, pattern(), None, None).collect();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].body, "第1章 A\nbody");
    }
}
