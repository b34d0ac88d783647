//! Core amount primitives.
//!
//! Parsing, rounding and formatting rules shared by the ledger, the
//! exporter and the text view.

pub mod amount;

// Re-export core types
pub use amount::{
    Amount, BALANCE_TOLERANCE,
    parse_amount, round2, format_amount, format_profit_loss, is_balanced,
};
