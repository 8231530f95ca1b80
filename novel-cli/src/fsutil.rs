//! File helpers: atomic output publishing and filename sanitizing.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Writes output to a private temporary file and publishes it with an
/// atomic rename only after the full write succeeded.
///
/// The temporary file lives in the destination directory so the rename
/// never crosses a filesystem. Dropping the writer without calling
/// [`commit`](Self::commit) removes the temporary file, leaving no
/// partial artifact behind.
pub struct AtomicWriter {
    file: NamedTempFile,
}

impl AtomicWriter {
    /// Create a writer whose eventual destination is inside `dest_dir`.
    pub fn new(dest_dir: &Path) -> Result<Self> {
        let file = NamedTempFile::new_in(dest_dir).with_context(|| {
            format!("Failed to create temporary file in {}", dest_dir.display())
        })?;
        Ok(Self { file })
    }

    /// Publish the written content at `dest`, replacing any existing
    /// file atomically.
    pub fn commit(self, dest: &Path) -> Result<()> {
        self.file
            .persist(dest)
            .with_context(|| format!("Failed to publish output file: {}", dest.display()))?;
        Ok(())
    }
}

impl Write for AtomicWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Reduce a chapter title to something safe for a filename: keep
/// alphanumerics (including CJK), underscores, and hyphens.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}
