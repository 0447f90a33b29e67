use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_warn;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::{content_hash, is_valid_output_id};
use crate::FailureCategory;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid content for {0}: empty document")]
    EmptyContent(String),
    #[error("invalid output filename: {0:?}")]
    InvalidFilename(String),
}

impl PersistError {
    /// Validation problems are content faults; everything else is the filesystem.
    pub fn category(&self) -> FailureCategory {
        match self {
            PersistError::EmptyContent(_) | PersistError::InvalidFilename(_) => {
                FailureCategory::Content
            }
            PersistError::OutputDir(_) | PersistError::Io(_) => FailureCategory::FileSystem,
        }
    }
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
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file in the
/// same directory then renaming it over the target.
#[derive(Debug, Clone)]
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
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // `persist` renames over an existing target.
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    /// Validate and write one converted document; returns the hash of what was written.
    pub fn write_document(&self, output_id: &str, content: &str) -> Result<String, PersistError> {
        if content.trim().is_empty() {
            return Err(PersistError::EmptyContent(output_id.to_string()));
        }
        if !is_valid_output_id(output_id) {
            return Err(PersistError::InvalidFilename(output_id.to_string()));
        }
        self.write(output_id, content)?;
        Ok(content_hash(content))
    }

    /// Best-effort read of a previously written document.
    ///
    /// A missing file is `None`; any other read failure is logged and also `None`.
    pub fn read_existing(&self, output_id: &str) -> Option<String> {
        if !is_valid_output_id(output_id) {
            return None;
        }
        let path = self.dir.join(output_id);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                engine_warn!("Could not read existing file {:?}: {}", path, err);
                None
            }
        }
    }
}
