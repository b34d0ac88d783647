//! Ledger Snapshots
//!
//! The persistence record: `{"players": [...], "nextId": n}`.
//!
//! Reading a snapshot never fails. Each field degrades on its own:
//!
//! ```text
//! ┌──────────────┬───────────────────────────────┬──────────────┐
//! │  field       │  accepted                     │  otherwise   │
//! ├──────────────┼───────────────────────────────┼──────────────┤
//! │  players     │  array of {id, name, ...}     │  []          │
//! │  players[i]  │  {id, name, ...}              │  dropped     │
//! │  nextId      │  non-negative integer         │  0           │
//! │              │  (alias: playerIdCounter)     │              │
//! └──────────────┴───────────────────────────────┴──────────────┘
//! ```

use std::collections::BTreeSet;

use serde::{Serialize, Deserialize};
use serde_json::Value;
use tracing::warn;

use crate::core::amount::Amount;
use crate::ledger::player::{Player, PlayerId};

/// Storage key the snapshot lives under.
pub const STORAGE_KEY: &str = "pokerCalculatorData";

/// Serialized ledger: players in order plus the id counter.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    /// Players in insertion order.
    pub players: Vec<Player>,
    /// Last id handed out.
    pub next_id: u32,
}

/// Player as it appears in a stored record.
///
/// Stored `profitLoss` is ignored; it is derived again on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRecord {
    id: PlayerId,
    name: String,
    #[serde(default)]
    buy_in: Option<Amount>,
    #[serde(default)]
    final_stack: Option<Amount>,
}

impl PlayerRecord {
    fn into_player(self) -> Player {
        Player::with_amounts(
            self.id,
            self.name,
            self.buy_in.unwrap_or(0.0),
            self.final_stack.unwrap_or(0.0),
        )
    }
}

impl LedgerSnapshot {
    /// Read a snapshot from parsed JSON. Never fails.
    pub fn from_value(value: &Value) -> Self {
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => return Self::default(),
            other => {
                warn!(kind = json_kind(other), "snapshot is not an object, starting empty");
                return Self::default();
            }
        };

        let players = match obj.get("players") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    match serde_json::from_value::<PlayerRecord>(entry.clone()) {
                        Ok(record) => Some(record.into_player()),
                        Err(e) => {
                            warn!(index, "dropping malformed snapshot player: {}", e);
                            None
                        }
                    }
                })
                .collect(),
            Some(other) => {
                warn!(kind = json_kind(other), "snapshot players is not an array, dropping them");
                Vec::new()
            }
        };

        let next_id = match obj.get("nextId").or_else(|| obj.get("playerIdCounter")) {
            None | Some(Value::Null) => 0,
            Some(raw) => match raw.as_u64().and_then(|n| u32::try_from(n).ok()) {
                Some(n) => n,
                None => {
                    warn!("snapshot id counter malformed ({}), using 0", raw);
                    0
                }
            },
        };

        Self { players, next_id }.normalized()
    }

    /// Read a snapshot from JSON text. Never fails.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("snapshot is not valid JSON, starting empty: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Enforce ledger invariants on a snapshot from outside.
    ///
    /// Drops blank names and entries repeating an earlier id or name, trims
    /// names, and raises the counter to at least the largest id.
    pub fn normalized(self) -> Self {
        let mut seen_ids = BTreeSet::new();
        let mut seen_names = BTreeSet::new();
        let mut players = Vec::with_capacity(self.players.len());

        for player in self.players {
            let name = player.name().trim().to_string();
            if name.is_empty() {
                warn!(id = %player.id(), "dropping snapshot player with blank name");
                continue;
            }
            if !seen_ids.insert(player.id()) || !seen_names.insert(name.clone()) {
                warn!(id = %player.id(), name = %name, "dropping duplicate snapshot player");
                continue;
            }
            players.push(Player::with_amounts(
                player.id(),
                name,
                player.buy_in(),
                player.final_stack(),
            ));
        }

        let max_id = players.iter().map(|p| p.id().get()).max().unwrap_or(0);
        Self {
            players,
            next_id: self.next_id.max(max_id),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
