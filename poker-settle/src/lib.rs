//! # Poker Settle
//!
//! Settlement ledger for home poker games: record each player's buy-in and
//! final stack, derive profit/loss, and check that the table balances.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       POKER SETTLE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Amount primitives                         │
//! │  └── amount.rs   - Parsing, rounding, display, tolerance     │
//! │                                                              │
//! │  ledger/         - Settlement state (no I/O)                 │
//! │  ├── player.rs   - Player records and editable fields        │
//! │  ├── state.rs    - Ledger commands and verification          │
//! │  ├── events.rs   - Change events                             │
//! │  └── session.rs  - Observer fan-out                          │
//! │                                                              │
//! │  store/          - Persistence (best-effort)                 │
//! │  ├── snapshot.rs - Stored record, permissive restore         │
//! │  ├── persist.rs  - Memory/file stores, autosave              │
//! │  └── export.rs   - Dated JSON export                         │
//! │                                                              │
//! │  view.rs         - Display rows and status line              │
//! │  config.rs       - Binary configuration from environment     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Balance Rule
//!
//! A table is balanced when the sum of all profit/loss figures is within
//! 0.01 of zero. Amount input is parsed permissively: anything that is not
//! a number counts as `0`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod ledger;
pub mod store;
pub mod view;
pub mod config;

// Re-export commonly used types
pub use crate::core::amount::{Amount, BALANCE_TOLERANCE, parse_amount, format_profit_loss};
pub use ledger::{Field, Ledger, LedgerError, LedgerEvent, LedgerObserver, Player, PlayerId, Session, Verification};
pub use store::{ExportRecord, FileStore, LedgerSnapshot, MemoryStore, SnapshotStore, STORAGE_KEY};
pub use view::TableView;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
