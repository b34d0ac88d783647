//! Ledger Events
//!
//! Emitted by every successful ledger mutation so observers (views,
//! autosave) can react without the ledger knowing about them.

use serde::Serialize;

use crate::core::amount::Amount;
use crate::ledger::player::{Field, PlayerId};

/// A change applied to the ledger.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A player joined the table.
    PlayerAdded {
        /// Assigned id.
        id: PlayerId,
        /// Trimmed name.
        name: String,
    },

    /// A player left the table.
    PlayerRemoved {
        /// Id of the removed player.
        id: PlayerId,
    },

    /// An amount field was edited.
    FieldUpdated {
        /// Edited player.
        id: PlayerId,
        /// Which field changed.
        field: Field,
        /// Stored value after parsing.
        value: Amount,
        /// Recomputed profit/loss.
        profit_loss: Amount,
    },

    /// All players cleared and the id counter reset.
    Reset {
        /// Number of players dropped.
        cleared: usize,
    },

    /// Ledger replaced wholesale from a snapshot.
    Restored {
        /// Players after restore.
        players: usize,
        /// Id counter after restore.
        next_id: u32,
    },
}

impl LedgerEvent {
    /// Player the event concerns, if it concerns exactly one.
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            LedgerEvent::PlayerAdded { id, .. }
            | LedgerEvent::PlayerRemoved { id }
            | LedgerEvent::FieldUpdated { id, .. } => Some(*id),
            LedgerEvent::Reset { .. } | LedgerEvent::Restored { .. } => None,
        }
    }

    /// Short name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerEvent::PlayerAdded { .. } => "player_added",
            LedgerEvent::PlayerRemoved { .. } => "player_removed",
            LedgerEvent::FieldUpdated { .. } => "field_updated",
            LedgerEvent::Reset { .. } => "reset",
            LedgerEvent::Restored { .. } => "restored",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player_id() {
        let added = LedgerEvent::PlayerAdded { id: PlayerId(2), name: "Ann".into() };
        assert_eq!(added.player_id(), Some(PlayerId(2)));
        assert_eq!(LedgerEvent::Reset { cleared: 3 }.player_id(), None);
    }

    #[test]
    fn test_event_json_tag() {
        let event = LedgerEvent::FieldUpdated {
            id: PlayerId(1),
            field: Field::BuyIn,
            value: 100.0,
            profit_loss: -100.0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "field_updated");
        assert_eq!(json["field"], "buyIn");
        assert_eq!(event.kind(), "field_updated");
    }
}
