use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use recovery_core::{build_markdown_document, numbered_stem, post_file_stem, PostRecord};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then
/// renaming. The directory must already exist; an existing target is never
/// replaced.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist_noclobber(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Writes recovered posts into the `_posts` directory, never overwriting an
/// existing file: `Title.md`, then `Title_1.md`, `Title_2.md`, ...
pub struct PostWriter {
    writer: AtomicFileWriter,
}

impl PostWriter {
    pub fn new(posts_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(posts_dir),
        }
    }

    pub fn write_post(&self, record: &PostRecord) -> Result<PathBuf, PersistError> {
        let filename = self.free_filename(&post_file_stem(record.title()));
        self.writer
            .write(&filename, &build_markdown_document(record))
    }

    fn free_filename(&self, stem: &str) -> String {
        (0..)
            .map(|attempt| format!("{}.md", numbered_stem(stem, attempt)))
            .find(|name| !self.writer.dir().join(name).exists())
            .unwrap_or_else(|| format!("{stem}.md"))
    }
}
