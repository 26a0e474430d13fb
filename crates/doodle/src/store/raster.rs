use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::error::{Error, Result};

/// Object store for uploaded doodles.
pub trait RasterStore: Send + Sync {
    fn download(&self, path: &str) -> Result<Vec<u8>>;

    /// Store `bytes` at `path`. Returns the stored path.
    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String>;
}

fn storage_error(path: &str, message: impl Into<String>) -> Error {
    Error::Storage {
        path: path.to_string(),
        message: message.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Process-local raster store.
#[derive(Debug, Default)]
pub struct MemoryRasterStore {
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl MemoryRasterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, path: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }
}

impl RasterStore for MemoryRasterStore {
    fn download(&self, path: &str) -> Result<Vec<u8>> {
        self.object(path)
            .map(|o| o.bytes)
            .ok_or_else(|| storage_error(path, "No such object"))
    }

    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                path.to_string(),
                StoredObject {
                    bytes: bytes.to_vec(),
                    content_type: content_type.to_string(),
                },
            );
        Ok(path.to_string())
    }
}

/// Raster store rooted at a local directory.
///
/// Object paths are relative (`doodles/{uid}/{date}.png`); absolute paths
/// and `..` components are rejected.
#[derive(Debug, Clone)]
pub struct FsRasterStore {
    root: PathBuf,
}

impl FsRasterStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let is_plain = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_plain {
            return Err(storage_error(path, "Object path must be relative"));
        }
        Ok(self.root.join(relative))
    }
}

impl RasterStore for FsRasterStore {
    fn download(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        fs::read(&full).map_err(|e| storage_error(path, e.to_string()))
    }

    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error(path, e.to_string()))?;
        }
        fs::write(&full, bytes).map_err(|e| storage_error(path, e.to_string()))?;
        debug!("Uploaded {} ({} bytes, {})", path, bytes.len(), content_type);
        Ok(path.to_string())
    }
}
