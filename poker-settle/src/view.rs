//! Table View
//!
//! Display-ready state computed from the ledger: one row per player plus
//! the verification status line. Rendering targets (terminal, HTML) read
//! this instead of the ledger.

use std::fmt;

use serde::Serialize;

use crate::core::amount::{Amount, format_amount, format_profit_loss};
use crate::ledger::player::{Player, PlayerId};
use crate::ledger::state::Ledger;

/// Profit/loss styling class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitLossClass {
    /// Net winner.
    Positive,
    /// Net loser.
    Negative,
    /// Broke even.
    Zero,
}

impl ProfitLossClass {
    /// Classify a profit/loss figure.
    pub fn of(value: Amount) -> Self {
        if value > 0.0 {
            ProfitLossClass::Positive
        } else if value < 0.0 {
            ProfitLossClass::Negative
        } else {
            ProfitLossClass::Zero
        }
    }

    /// Style class name.
    pub fn as_str(self) -> &'static str {
        match self {
            ProfitLossClass::Positive => "positive",
            ProfitLossClass::Negative => "negative",
            ProfitLossClass::Zero => "zero",
        }
    }
}

/// Verification banner state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No players yet.
    Empty,
    /// Total within tolerance.
    Balanced,
    /// Total outside tolerance.
    Unbalanced {
        /// Table total.
        total: Amount,
    },
}

impl VerificationStatus {
    /// Status for the current ledger.
    pub fn of(ledger: &Ledger) -> Self {
        if ledger.is_empty() {
            return VerificationStatus::Empty;
        }
        let verdict = ledger.verify();
        if verdict.balanced {
            VerificationStatus::Balanced
        } else {
            VerificationStatus::Unbalanced { total: verdict.total }
        }
    }

    /// Message shown to the user.
    pub fn message(&self) -> String {
        match self {
            VerificationStatus::Empty => "Add players and enter their amounts".to_string(),
            VerificationStatus::Balanced => "Settlement balanced".to_string(),
            VerificationStatus::Unbalanced { total } => {
                format!("Settlement off by {}", format_profit_loss(*total))
            }
        }
    }
}

/// One display row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerRow {
    /// Player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Buy-in, two decimals.
    pub buy_in: String,
    /// Final stack, two decimals.
    pub final_stack: String,
    /// Signed profit/loss.
    pub profit_loss: String,
    /// Styling class for `profit_loss`.
    pub class: ProfitLossClass,
}

impl PlayerRow {
    fn from_player(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            buy_in: format_amount(player.buy_in()),
            final_stack: format_amount(player.final_stack()),
            profit_loss: format_profit_loss(player.profit_loss()),
            class: ProfitLossClass::of(player.profit_loss()),
        }
    }
}

/// Everything a renderer needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableView {
    /// Rows in table order.
    pub rows: Vec<PlayerRow>,
    /// Banner state.
    pub status: VerificationStatus,
}

impl TableView {
    /// Build from the ledger.
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            rows: ledger.players().iter().map(PlayerRow::from_player).collect(),
            status: VerificationStatus::of(ledger),
        }
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self.rows
            .iter()
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Player".len());

        writeln!(
            f,
            "{:>4}  {:<name_width$}  {:>10}  {:>10}  {:>10}",
            "#", "Player", "Buy-in", "Final", "P/L",
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>4}  {:<name_width$}  {:>10}  {:>10}  {:>10}",
                row.id.get(), row.name, row.buy_in, row.final_stack, row.profit_loss,
            )?;
        }
        write!(f, "{}", self.status.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::player::Field;

    #[test]
    fn test_class_of() {
        assert_eq!(ProfitLossClass::of(5.0), ProfitLossClass::Positive);
        assert_eq!(ProfitLossClass::of(-0.5), ProfitLossClass::Negative);
        assert_eq!(ProfitLossClass::of(0.0), ProfitLossClass::Zero);
        assert_eq!(ProfitLossClass::Negative.as_str(), "negative");
    }

    #[test]
    fn test_status_messages() {
        let mut ledger = Ledger::new();
        assert_eq!(VerificationStatus::of(&ledger), VerificationStatus::Empty);

        let ann = ledger.add_player("Ann").unwrap().id();
        assert_eq!(VerificationStatus::of(&ledger), VerificationStatus::Balanced);
        assert_eq!(VerificationStatus::Balanced.message(), "Settlement balanced");

        ledger.update_player_field(ann, Field::FinalStack, "12.5").unwrap();
        let status = VerificationStatus::of(&ledger);
        assert_eq!(status, VerificationStatus::Unbalanced { total: 12.5 });
        assert_eq!(status.message(), "Settlement off by +12.50");
    }

    #[test]
    fn test_rows() {
        let mut ledger = Ledger::new();
        let bob = ledger.add_player("Bob").unwrap().id();
        ledger.update_player_field(bob, Field::BuyIn, "100").unwrap();
        ledger.update_player_field(bob, Field::FinalStack, "250").unwrap();

        let view = TableView::from_ledger(&ledger);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].buy_in, "100.00");
        assert_eq!(view.rows[0].final_stack, "250.00");
        assert_eq!(view.rows[0].profit_loss, "+150.00");
        assert_eq!(view.rows[0].class, ProfitLossClass::Positive);
    }

    #[test]
    fn test_display_text() {
        let mut ledger = Ledger::new();
        let ann = ledger.add_player("Ann").unwrap().id();
        ledger.update_player_field(ann, Field::BuyIn, "20").unwrap();

        let text = TableView::from_ledger(&ledger).to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Ann"));
        assert!(lines[1].ends_with("-20.00"));
        assert_eq!(lines[2], "Settlement off by -20.00");
    }
}
