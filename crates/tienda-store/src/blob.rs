//! # Blob Store
//!
//! Key → bytes storage for uploaded product images and profile pictures.
//!
//! ## Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Blob Key Layout                                │
//! │                                                                         │
//! │  upload "C:\\photos\\tv.jpg" for product 1                              │
//! │       │                                                                 │
//! │       │ blob_key: keep the final path component                        │
//! │       ▼                                                                 │
//! │  "products/1_tv.jpg"  ← stored on the entity as image_url              │
//! │       │                                                                 │
//! │       ├── FsBlobStore     → {root}/products/1_tv.jpg                   │
//! │       └── MemoryBlobStore → HashMap entry                              │
//! │                                                                         │
//! │  The location returned by put() is the key itself.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use tienda_core::EntityKind;

// =============================================================================
// Errors
// =============================================================================

/// Blob store failures.
#[derive(Debug, Error)]
pub enum BlobError {
    /// No blob is stored under this key.
    #[error("Blob not found: {key}")]
    NotFound { key: String },

    /// The key or filename cannot be mapped to a safe location.
    #[error("Invalid blob key: {key}")]
    InvalidKey { key: String },

    /// The backing filesystem failed.
    #[error("Blob I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Key Construction
// =============================================================================

/// Builds the blob key for an entity's upload.
///
/// Only the final component of `filename` is kept, whichever separator
/// the client used.
///
/// ## Example
/// ```rust
/// use tienda_core::EntityKind;
/// use tienda_store::blob::blob_key;
///
/// assert_eq!(blob_key(EntityKind::Product, 1, "../../tv.jpg").unwrap(), "products/1_tv.jpg");
/// assert!(blob_key(EntityKind::User, 2, "..").is_err());
/// ```
pub fn blob_key(entity: EntityKind, id: i64, filename: &str) -> Result<String, BlobError> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(BlobError::InvalidKey {
            key: filename.to_string(),
        });
    }

    Ok(format!("{}/{}_{}", entity.collection(), id, name))
}

// =============================================================================
// Trait
// =============================================================================

/// Storage for uploaded binary content.
///
/// Implementations must be shareable across request handlers.
#[async_trait]
pub trait BlobStore: Send + Sync + Debug {
    /// Stores `bytes` under `key`, replacing any previous content.
    ///
    /// Returns the location to record on the entity.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, BlobError>;

    /// Reads the content stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError>;
}

// =============================================================================
// Filesystem Backend
// =============================================================================

/// Stores blobs as files below a root directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`. Directories are created on first put.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsBlobStore { root: root.into() }
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a key to a path under the root, rejecting anything that
    /// could escape it.
    fn resolve(&self, key: &str) -> Result<PathBuf, BlobError> {
        let path = Path::new(key);
        let safe = !key.is_empty()
            && path
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !safe {
            return Err(BlobError::InvalidKey {
                key: key.to_string(),
            });
        }

        Ok(self.root.join(path))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, BlobError> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;

        debug!(key, size = bytes.len(), path = %path.display(), "Blob written");
        Ok(key.to_string())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.resolve(key)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(BlobError::NotFound {
                key: key.to_string(),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Keeps blobs in a map. Used by tests.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, BlobError> {
        self.blobs.write().await.insert(key.to_string(), bytes);
        Ok(key.to_string())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound {
                key: key.to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
