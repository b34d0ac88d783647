//! Settlement Ledger Module
//!
//! ## Module Structure
//!
//! - `player`: Player records, ids, editable fields
//! - `state`: The ledger and its command surface
//! - `events`: Change notifications queued by the ledger
//! - `session`: Ledger plus observer fan-out

pub mod player;
pub mod state;
pub mod events;
pub mod session;

// Re-export key types
pub use player::{Player, PlayerId, Field};
pub use state::{Ledger, LedgerError, Verification};
pub use events::LedgerEvent;
pub use session::{Session, LedgerObserver};
