//! Player Records
//!
//! A seat at the settlement table: name, buy-in, final stack and the
//! derived profit/loss.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::core::amount::Amount;

// =============================================================================
// PLAYER ID
// =============================================================================

/// Player identifier, assigned from the ledger's counter starting at 1.
///
/// Ids are never reused while the counter lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create from a raw counter value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw counter value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// EDITABLE FIELDS
// =============================================================================

/// Amount fields a user may edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Total contributed over the session.
    BuyIn,
    /// Chips held at session end.
    FinalStack,
}

impl Field {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::BuyIn => "buyIn",
            Field::FinalStack => "finalStack",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyIn" => Ok(Field::BuyIn),
            "finalStack" => Ok(Field::FinalStack),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// One player's settlement line.
///
/// Amount fields are private so `profit_loss` can never drift from
/// `final_stack - buy_in`. Deserialization goes through
/// [`crate::store::snapshot`], which rebuilds players via [`Player::with_amounts`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    name: String,
    buy_in: Amount,
    final_stack: Amount,
    profit_loss: Amount,
}

impl Player {
    /// New player with zeroed amounts.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self::with_amounts(id, name, 0.0, 0.0)
    }

    /// Player with the given amounts; profit/loss is derived.
    pub fn with_amounts(
        id: PlayerId,
        name: impl Into<String>,
        buy_in: Amount,
        final_stack: Amount,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            buy_in,
            final_stack,
            profit_loss: final_stack - buy_in,
        }
    }

    /// Player id.
    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total buy-in.
    #[inline]
    pub fn buy_in(&self) -> Amount {
        self.buy_in
    }

    /// Final chip stack.
    #[inline]
    pub fn final_stack(&self) -> Amount {
        self.final_stack
    }

    /// Final stack minus buy-in.
    #[inline]
    pub fn profit_loss(&self) -> Amount {
        self.profit_loss
    }

    /// Read one of the editable fields.
    pub fn field(&self, field: Field) -> Amount {
        match field {
            Field::BuyIn => self.buy_in,
            Field::FinalStack => self.final_stack,
        }
    }

    /// Set an editable field and recompute profit/loss.
    pub fn set_field(&mut self, field: Field, value: Amount) {
        match field {
            Field::BuyIn => self.buy_in = value,
            Field::FinalStack => self.final_stack = value,
        }
        self.profit_loss = self.final_stack - self.buy_in;
    }
}
