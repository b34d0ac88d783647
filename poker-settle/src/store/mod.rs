//! Persistence and export.
//!
//! - `snapshot`: The stored record and its permissive reader
//! - `persist`: Record stores and the autosave observer
//! - `export`: Dated, write-only settlement files

pub mod snapshot;
pub mod persist;
pub mod export;

pub use snapshot::{LedgerSnapshot, STORAGE_KEY};
pub use persist::{SnapshotStore, StoreError, MemoryStore, FileStore, AutoSave};
pub use export::{ExportRecord, ExportError};
