use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docsync_core::{Manifest, ManifestLabels, RunMetadata};
use engine_logging::{engine_info, engine_warn};
use thiserror::Error;

use crate::config::Clock;
use crate::persist::{AtomicFileWriter, PersistError};

pub const MANIFEST_FILENAME: &str = "docs_manifest.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write manifest: {0}")]
    Persist(#[from] PersistError),
}

/// Durable home of the [`Manifest`].
pub struct ManifestStore {
    path: PathBuf,
    labels: ManifestLabels,
    clock: Clock,
}

impl ManifestStore {
    pub fn new(path: PathBuf, labels: ManifestLabels, clock: Clock) -> Self {
        Self {
            path,
            labels,
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing, unreadable or malformed file yields an empty manifest.
    pub fn load(&self) -> Manifest {
        load_manifest(&self.path)
    }

    /// Stamp and atomically write `manifest`.
    ///
    /// Sets `last_updated` from the store's clock, replaces the run metadata when
    /// given, and applies the publication labels.
    pub fn save(
        &self,
        manifest: &mut Manifest,
        metadata: Option<RunMetadata>,
    ) -> Result<PathBuf, ManifestError> {
        manifest.last_updated = Some((self.clock)());
        if let Some(metadata) = metadata {
            manifest.fetch_metadata = Some(metadata);
        }
        if self.labels != ManifestLabels::default() {
            manifest.labels = self.labels.clone();
        }

        let content = serde_json::to_string_pretty(manifest)?;

        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::InvalidFilename(self.path.display().to_string()))?;
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let writer = AtomicFileWriter::new(dir.to_path_buf());
        let written = writer.write(filename, &content)?;
        engine_info!(
            "Saved manifest with {} entries to {:?}",
            manifest.len(),
            written
        );
        Ok(written)
    }
}

/// Load the manifest at `path`, starting fresh on any problem.
pub fn load_manifest(path: &Path) -> Manifest {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Manifest::new();
        }
        Err(err) => {
            engine_warn!("Failed to read manifest from {:?}: {}", path, err);
            return Manifest::new();
        }
    };

    match serde_json::from_str::<Manifest>(&content) {
        Ok(manifest) => {
            engine_info!(
                "Loaded manifest with {} entries from {:?}",
                manifest.len(),
                path
            );
            manifest
        }
        Err(err) => {
            engine_warn!("Failed to parse manifest from {:?}: {}", path, err);
            Manifest::new()
        }
    }
}
