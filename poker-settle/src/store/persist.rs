//! Snapshot Persistence
//!
//! A flat key/value record store plus the observer that writes the ledger
//! into it after every change. Saving is best-effort: failures are logged
//! and never reach the command that triggered them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ledger::events::LedgerEvent;
use crate::ledger::session::LedgerObserver;
use crate::ledger::state::Ledger;
use crate::store::snapshot::{LedgerSnapshot, STORAGE_KEY};

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file I/O failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// Snapshot could not be encoded.
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat string-keyed record store.
pub trait SnapshotStore {
    /// Read the record under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the record under `key`, replacing any previous one.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load the ledger snapshot from a store.
///
/// Absent records, read failures and corrupt records all yield an empty
/// snapshot.
pub fn load_snapshot<S: SnapshotStore + ?Sized>(store: &S) -> LedgerSnapshot {
    match store.load(STORAGE_KEY) {
        Ok(Some(json)) => LedgerSnapshot::from_json(&json),
        Ok(None) => {
            debug!("no saved ledger, starting empty");
            LedgerSnapshot::default()
        }
        Err(e) => {
            warn!("could not read saved ledger: {}", e);
            LedgerSnapshot::default()
        }
    }
}

/// Write the ledger snapshot into a store.
pub fn save_snapshot<S: SnapshotStore + ?Sized>(
    store: &mut S,
    snapshot: &LedgerSnapshot,
) -> Result<(), StoreError> {
    let json = snapshot.to_json()?;
    store.save(STORAGE_KEY, &json)
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory store. Clones share the same records.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw record under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    /// Put a raw record, bypassing snapshot encoding.
    pub fn insert(&self, key: &str, value: impl Into<String>) {
        self.records.borrow_mut().insert(key.to_string(), value.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.insert(key, value);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// One `<key>.json` file per record under a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        // Replace through a temp file.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// =============================================================================
// AUTOSAVE OBSERVER
// =============================================================================

/// Observer that saves the whole ledger after every event.
#[derive(Debug)]
pub struct AutoSave<S> {
    store: S,
}

impl<S: SnapshotStore> AutoSave<S> {
    /// Autosave into `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: SnapshotStore> LedgerObserver for AutoSave<S> {
    fn notify(&mut self, event: &LedgerEvent, ledger: &Ledger) {
        match save_snapshot(&mut self.store, &ledger.serialize()) {
            Ok(()) => debug!(event = event.kind(), "ledger saved"),
            Err(e) => warn!(event = event.kind(), "could not save ledger: {}", e),
        }
    }
}
