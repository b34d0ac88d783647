//! Settlement Export
//!
//! A write-only record of the table at a point in time, offered to the
//! user as a dated JSON file. Never read back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::core::amount::Amount;
use crate::ledger::player::Player;
use crate::ledger::state::Ledger;

/// Prefix of every export file name.
pub const EXPORT_FILE_PREFIX: &str = "poker-settlement";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export.
    #[error("no players to export")]
    EmptyLedger,
    /// Writing the file failed.
    #[error("export I/O failed: {0}")]
    Io(#[from] io::Error),
    /// Encoding the record failed.
    #[error("export encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exported settlement.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// ISO-8601 UTC time of export, millisecond precision.
    pub timestamp: String,
    /// Players in table order.
    pub players: Vec<Player>,
    /// Sum of profit/loss.
    pub total_profit_loss: Amount,
    #[serde(skip)]
    taken_at: DateTime<Utc>,
}

impl ExportRecord {
    /// Capture the ledger at `now`. Empty ledgers are refused.
    pub fn from_ledger(ledger: &Ledger, now: DateTime<Utc>) -> Result<Self, ExportError> {
        if ledger.is_empty() {
            return Err(ExportError::EmptyLedger);
        }
        Ok(Self {
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            players: ledger.players().to_vec(),
            total_profit_loss: ledger.total_profit_loss(),
            taken_at: now,
        })
    }

    /// `poker-settlement-YYYY-MM-DD.json`, dated by the export time.
    pub fn file_name(&self) -> String {
        format!("{}-{}.json", EXPORT_FILE_PREFIX, self.taken_at.format("%Y-%m-%d"))
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write into `dir` under [`Self::file_name`]; returns the path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        fs::write(&path, self.to_json()?)?;
        info!(path = %path.display(), players = self.players.len(), "settlement exported");
        Ok(path)
    }
}
