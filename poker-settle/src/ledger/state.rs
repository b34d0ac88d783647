//! Settlement Ledger
//!
//! The roster of players at the table and the id counter.
//! Mutations queue [`LedgerEvent`]s; nothing here renders or persists.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::core::amount::{Amount, parse_amount, is_balanced};
use crate::ledger::events::LedgerEvent;
use crate::ledger::player::{Field, Player, PlayerId};
use crate::store::snapshot::LedgerSnapshot;

// =============================================================================
// ERRORS
// =============================================================================

/// Rejected ledger commands. None of these mutate the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Name was blank after trimming.
    #[error("player name must not be empty")]
    EmptyName,
    /// Another current player already has this name.
    #[error("a player named {0:?} already exists")]
    DuplicateName(String),
    /// No player with this id.
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),
    /// The id counter is at its maximum; reset to seat more players.
    #[error("player ids exhausted")]
    IdsExhausted,
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Table-wide balance verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Verification {
    /// Whether `|total|` is within tolerance.
    pub balanced: bool,
    /// Sum of every player's profit/loss.
    pub total: Amount,
}

// =============================================================================
// LEDGER
// =============================================================================

/// Ordered players plus the id counter.
///
/// `id_counter` holds the last id handed out; the next player gets
/// `id_counter + 1`.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    players: Vec<Player>,
    id_counter: u32,
    pending_events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Empty ledger with the counter at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger restored from a snapshot.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        let snapshot = snapshot.normalized();
        Self {
            players: snapshot.players,
            id_counter: snapshot.next_id,
            pending_events: Vec::new(),
        }
    }

    /// Players in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// True when no players are held.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Last id handed out.
    pub fn id_counter(&self) -> u32 {
        self.id_counter
    }

    /// Get a player by id.
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Add a player with zeroed amounts.
    ///
    /// The name is trimmed; blank and duplicate names are rejected.
    pub fn add_player(&mut self, name: &str) -> Result<&Player, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if self.players.iter().any(|p| p.name() == name) {
            return Err(LedgerError::DuplicateName(name.to_string()));
        }

        let next = self.id_counter.checked_add(1).ok_or(LedgerError::IdsExhausted)?;
        self.id_counter = next;
        let id = PlayerId::new(next);
        debug!(%id, name, "player added");

        self.players.push(Player::new(id, name));
        self.push_event(LedgerEvent::PlayerAdded { id, name: name.to_string() });
        Ok(&self.players[self.players.len() - 1])
    }

    /// Remove a player. Unknown ids are ignored.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id() == id)?;
        let removed = self.players.remove(index);
        debug!(%id, name = removed.name(), "player removed");
        self.push_event(LedgerEvent::PlayerRemoved { id });
        Some(removed)
    }

    /// Set an amount field from raw input and recompute profit/loss.
    ///
    /// Unparseable input is stored as `0`; negative values are kept.
    pub fn update_player_field(
        &mut self,
        id: PlayerId,
        field: Field,
        raw_value: &str,
    ) -> Result<&Player, LedgerError> {
        let index = self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or(LedgerError::UnknownPlayer(id))?;

        let value = parse_amount(raw_value);
        let player = &mut self.players[index];
        player.set_field(field, value);
        let profit_loss = player.profit_loss();
        debug!(%id, %field, value, profit_loss, "field updated");

        self.push_event(LedgerEvent::FieldUpdated { id, field, value, profit_loss });
        Ok(&self.players[index])
    }

    /// Clear all players and reset the counter.
    ///
    /// Returns `false` (and does nothing) when already empty.
    pub fn reset_all(&mut self) -> bool {
        if self.players.is_empty() {
            return false;
        }
        let cleared = self.players.len();
        self.players.clear();
        self.id_counter = 0;
        debug!(cleared, "ledger reset");
        self.push_event(LedgerEvent::Reset { cleared });
        true
    }

    /// Sum of profit/loss and whether it is within tolerance.
    pub fn verify(&self) -> Verification {
        let total = self.total_profit_loss();
        Verification {
            balanced: is_balanced(total),
            total,
        }
    }

    /// Sum of every player's profit/loss.
    pub fn total_profit_loss(&self) -> Amount {
        self.players.iter().map(Player::profit_loss).sum()
    }

    /// Snapshot of players and counter for storage or export.
    pub fn serialize(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            players: self.players.clone(),
            next_id: self.id_counter,
        }
    }

    /// Replace the ledger wholesale. `None` yields an empty ledger.
    pub fn restore(&mut self, snapshot: Option<LedgerSnapshot>) {
        let snapshot = snapshot.unwrap_or_default().normalized();
        self.players = snapshot.players;
        self.id_counter = snapshot.next_id;
        debug!(players = self.players.len(), next_id = self.id_counter, "ledger restored");
        self.push_event(LedgerEvent::Restored {
            players: self.players.len(),
            next_id: self.id_counter,
        });
    }

    /// Restore from raw JSON text. Malformed text yields an empty ledger.
    pub fn restore_json(&mut self, json: &str) {
        self.restore(Some(LedgerSnapshot::from_json(json)));
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn push_event(&mut self, event: LedgerEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
