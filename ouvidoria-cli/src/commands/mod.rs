//! CLI command implementations.

pub mod list;
pub mod submit;
pub mod track;
pub mod transcribe;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ouvidoria_core::{FileBlobStore, ManifestationStore};

/// Open the manifestation store backed by the given data directory.
pub fn open_store(data_dir: &Path) -> Result<Arc<ManifestationStore>> {
    let blobs = FileBlobStore::new(data_dir)
        .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
    Ok(Arc::new(ManifestationStore::new(Arc::new(blobs))))
}
