//! Persistence hooks for storefront state.
//!
//! The state containers implement no storage. A persistence collaborator
//! implements [`StateStore`] and the root composition calls it through
//! [`crate::app::Storefront::load_from`] and
//! [`crate::app::Storefront::save_to`].
//!
//! Two adapters ship with the crate:
//! - [`MemoryStore`] keeps one snapshot in memory (tests, embedding)
//! - [`JsonFileStore`] writes the snapshot to a JSON file (the CLI)

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{Cart, Identity, Wishlist};

/// Errors from a [`StateStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored data could not be encoded or decoded.
    #[error("invalid stored state: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// State that survives a restart.
///
/// Catalog filters are transient and are not part of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub wishlist: Wishlist,
}

/// Load/save hooks a persistence collaborator implements.
pub trait StateStore {
    /// Load the last saved snapshot, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data exists but cannot be read.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Save a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

/// Keeps a single snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<Snapshot>>,
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }
}

/// Stores the snapshot as pretty-printed JSON in one file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}
