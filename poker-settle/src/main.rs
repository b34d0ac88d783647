//! Poker Settle
//!
//! Demo run of the settlement ledger against a file-backed store.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use poker_settle::{
    VERSION,
    config::SettleConfig,
    ledger::{Field, LedgerEvent, Ledger, Session},
    store::{ExportRecord, FileStore},
    view::TableView,
};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SettleConfig::from_env();
    info!("Poker Settle v{}", VERSION);
    info!("Data dir: {}", config.data_dir.display());

    let mut session = Session::open(FileStore::new(&config.data_dir));
    session.attach(|event: &LedgerEvent, ledger: &Ledger| {
        info!(event = event.kind(), total = ledger.verify().total, "ledger changed");
    });

    if session.ledger().is_empty() {
        demo_settlement(&mut session);
    } else {
        info!("Restored {} players from last run", session.ledger().len());
    }

    println!("{}", TableView::from_ledger(session.ledger()));

    if config.export {
        let record = ExportRecord::from_ledger(session.ledger(), Utc::now())?;
        let path = record.write_to_dir(&config.export_dir)?;
        info!("Exported to {}", path.display());
    }

    Ok(())
}

/// Seat a three-player table on an empty ledger and settle it.
fn demo_settlement(session: &mut Session) {
    info!("=== Settling Demo Table ===");

    let results = [
        ("Alice", "100", "220"),
        ("Bob", "100", "40"),
        ("Carl", "100", "40"),
    ];

    for (name, buy_in, final_stack) in results {
        let id = match session.add_player(name) {
            Ok(player) => player.id(),
            Err(e) => {
                warn!("Could not seat {}: {}", name, e);
                continue;
            }
        };
        for (field, raw) in [(Field::BuyIn, buy_in), (Field::FinalStack, final_stack)] {
            if let Err(e) = session.update_player_field(id, field, raw) {
                warn!("Could not update {}: {}", name, e);
            }
        }
    }

    // Seating the same name twice is refused.
    if let Err(e) = session.add_player("Alice") {
        info!("Rejected: {}", e);
    }

    let verdict = session.verify();
    if verdict.balanced {
        info!("TABLE BALANCED: total {:.2}", verdict.total);
    } else {
        info!("TABLE OFF: total {:.2}", verdict.total);
    }
}
