//! File-backed blob store.
//!
//! One file per key under a data directory. Writes go through a temporary
//! sibling file followed by a rename, so readers never observe a partial
//! write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::BlobStore;
use crate::error::{OuvidoriaError, Result};

/// Blob store persisting each key as `<dir>/<key>.json`.
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open (creating if necessary) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            OuvidoriaError::StorageError(format!(
                "Failed to create data directory {}: {e}",
                dir.display()
            ))
        })?;
        debug!(dir = %dir.display(), "File blob store opened");
        Ok(Self { dir })
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(OuvidoriaError::StorageError(format!(
                "Failed to read key '{key}': {e}"
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        fs::write(&tmp, value).map_err(|e| {
            OuvidoriaError::StorageError(format!("Failed to write key '{key}': {e}"))
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            OuvidoriaError::StorageError(format!("Failed to commit key '{key}': {e}"))
        })?;

        Ok(())
    }
}
