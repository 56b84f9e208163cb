//! Durable storage for the cart.
//!
//! A repository holds exactly one cart document under a fixed storage key.
//! The document wraps the state with a format version:
//!
//! ```json
//! {"state": {"items": [...]}, "version": 0}
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::CartState;

/// Current version of the persisted cart document.
pub const CART_DOCUMENT_VERSION: u32 = 0;

/// Default storage key for the cart slot.
pub const DEFAULT_STORAGE_KEY: &str = "shahd-cart";

/// Errors that can occur while loading or saving the cart.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the storage medium failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document was written by an incompatible version.
    #[error("Unsupported cart document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The storage medium refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save access to the persisted cart slot.
pub trait CartRepository {
    /// Read the stored cart, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the slot exists but cannot be read or
    /// decoded.
    fn load(&self) -> Result<Option<CartState>, RepositoryError>;

    /// Replace the stored cart with `state`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    fn save(&self, state: &CartState) -> Result<(), RepositoryError>;
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    state: &'a CartState,
    version: u32,
}

#[derive(Deserialize)]
struct Document {
    state: CartState,
    version: u32,
}

fn encode(state: &CartState) -> Result<String, RepositoryError> {
    Ok(serde_json::to_string(&DocumentRef {
        state,
        version: CART_DOCUMENT_VERSION,
    })?)
}

fn decode(raw: &str) -> Result<CartState, RepositoryError> {
    let document: Document = serde_json::from_str(raw)?;
    if document.version != CART_DOCUMENT_VERSION {
        return Err(RepositoryError::UnsupportedVersion {
            found: document.version,
            expected: CART_DOCUMENT_VERSION,
        });
    }
    Ok(document.state)
}

// =============================================================================
// File Repository
// =============================================================================

/// Stores the cart as `<data_dir>/<storage_key>.json`.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileCartRepository {
    path: PathBuf,
}

impl FileCartRepository {
    /// Create a repository for `storage_key` inside `data_dir`.
    ///
    /// The directory is created on first save.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>, storage_key: &str) -> Self {
        Self {
            path: data_dir.as_ref().join(format!("{storage_key}.json")),
        }
    }

    /// Path of the cart document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn io_error(&self, source: io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CartRepository for FileCartRepository {
    fn load(&self) -> Result<Option<CartState>, RepositoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let state = decode(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            items = state.items.len(),
            "Loaded cart"
        );
        Ok(Some(state))
    }

    fn save(&self, state: &CartState) -> Result<(), RepositoryError> {
        let raw = encode(state)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, raw).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::trace!(path = %self.path.display(), "Saved cart");
        Ok(())
    }
}

// =============================================================================
// In-Memory Repository
// =============================================================================

#[derive(Debug, Default)]
struct MemorySlot {
    document: Option<String>,
    fail_writes: bool,
    saves: usize,
}

/// In-process cart slot.
///
/// Clones share the same slot, so dropping a store and building a new one
/// from a clone behaves like a page reload. Documents are stored encoded,
/// exercising the same serialization as the file repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartRepository {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryCartRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves fail, e.g. to simulate an exhausted quota.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.fail_writes = fail;
        }
    }

    /// The raw stored document, if any.
    #[must_use]
    pub fn document(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.document.clone())
    }

    /// Replace the raw stored document.
    pub fn set_document(&self, raw: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.document = Some(raw.into());
        }
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.slot.lock().map(|slot| slot.saves).unwrap_or(0)
    }

    fn poisoned() -> RepositoryError {
        RepositoryError::Unavailable("memory slot lock poisoned".to_string())
    }
}

impl CartRepository for MemoryCartRepository {
    fn load(&self) -> Result<Option<CartState>, RepositoryError> {
        let raw = self.slot.lock().map_err(|_| Self::poisoned())?.document.clone();
        raw.as_deref().map(decode).transpose()
    }

    fn save(&self, state: &CartState) -> Result<(), RepositoryError> {
        let raw = encode(state)?;
        let mut slot = self.slot.lock().map_err(|_| Self::poisoned())?;
        if slot.fail_writes {
            return Err(RepositoryError::Unavailable(
                "storage quota exceeded".to_string(),
            ));
        }
        slot.document = Some(raw);
        slot.saves += 1;
        Ok(())
    }
}
