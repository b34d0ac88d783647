//! Settlement Session
//!
//! Owns the ledger and fans its events out to observers. The ledger stays
//! pure; rendering and persistence attach here independently.
//!
//! ```text
//!   command ──► Session ──► Ledger (mutate, queue events)
//!                  │
//!                  └──► take_events ──► observer 1 (view)
//!                                   └─► observer 2 (autosave)
//! ```

use tracing::debug;

use crate::ledger::events::LedgerEvent;
use crate::ledger::player::{Field, Player, PlayerId};
use crate::ledger::state::{Ledger, LedgerError, Verification};
use crate::store::persist::{AutoSave, SnapshotStore, load_snapshot};
use crate::store::snapshot::LedgerSnapshot;

/// Receives ledger events after each successful command.
///
/// Observers see the ledger as it is after the mutation and cannot fail
/// the command.
pub trait LedgerObserver {
    /// Handle one event.
    fn notify(&mut self, event: &LedgerEvent, ledger: &Ledger);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent, &Ledger),
{
    fn notify(&mut self, event: &LedgerEvent, ledger: &Ledger) {
        self(event, ledger)
    }
}

/// A ledger plus its observers.
#[derive(Default)]
pub struct Session {
    ledger: Ledger,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl Session {
    /// Session over an empty ledger with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over an existing ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger,
            observers: Vec::new(),
        }
    }

    /// Boot from a store: restore whatever it holds (corrupt or absent
    /// records give an empty ledger) and autosave back into it.
    pub fn open<S: SnapshotStore + 'static>(store: S) -> Self {
        let ledger = Ledger::from_snapshot(load_snapshot(&store));
        debug!(players = ledger.len(), next_id = ledger.id_counter(), "session opened");
        let mut session = Self::with_ledger(ledger);
        session.attach(AutoSave::new(store));
        session
    }

    /// Attach an observer. Observers run in attach order.
    pub fn attach<O: LedgerObserver + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Number of attached observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Read-only view of the ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// See [`Ledger::add_player`].
    pub fn add_player(&mut self, name: &str) -> Result<Player, LedgerError> {
        let player = self.ledger.add_player(name)?.clone();
        self.dispatch();
        Ok(player)
    }

    /// See [`Ledger::remove_player`].
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let removed = self.ledger.remove_player(id);
        self.dispatch();
        removed
    }

    /// See [`Ledger::update_player_field`].
    pub fn update_player_field(
        &mut self,
        id: PlayerId,
        field: Field,
        raw_value: &str,
    ) -> Result<Player, LedgerError> {
        let player = self.ledger.update_player_field(id, field, raw_value)?.clone();
        self.dispatch();
        Ok(player)
    }

    /// See [`Ledger::reset_all`].
    pub fn reset_all(&mut self) -> bool {
        let cleared = self.ledger.reset_all();
        self.dispatch();
        cleared
    }

    /// See [`Ledger::restore`].
    pub fn restore(&mut self, snapshot: Option<LedgerSnapshot>) {
        self.ledger.restore(snapshot);
        self.dispatch();
    }

    /// See [`Ledger::verify`].
    pub fn verify(&self) -> Verification {
        self.ledger.verify()
    }

    /// See [`Ledger::serialize`].
    pub fn serialize(&self) -> LedgerSnapshot {
        self.ledger.serialize()
    }

    /// Give up observers and return the ledger.
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }

    fn dispatch(&mut self) {
        for event in self.ledger.take_events() {
            for observer in &mut self.observers {
                observer.notify(&event, &self.ledger);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::store::persist::MemoryStore;
    use crate::store::snapshot::STORAGE_KEY;

    /// Session with a recorder observer; returns the shared event log.
    fn recorded_session() -> (Session, Rc<RefCell<Vec<LedgerEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let mut session = Session::new();
        session.attach(move |event: &LedgerEvent, _: &Ledger| {
            sink.borrow_mut().push(event.clone());
        });
        (session, log)
    }

    #[test]
    fn test_observers_see_each_command() {
        let (mut session, log) = recorded_session();
        let ann = session.add_player("Ann").unwrap();
        session.update_player_field(ann.id(), Field::BuyIn, "50").unwrap();
        session.remove_player(ann.id());

        let kinds: Vec<_> = log.borrow().iter().map(LedgerEvent::kind).collect();
        assert_eq!(kinds, vec!["player_added", "field_updated", "player_removed"]);
    }

    #[test]
    fn test_failed_commands_are_silent() {
        let (mut session, log) = recorded_session();
        session.add_player("Ann").unwrap();
        log.borrow_mut().clear();

        assert!(session.add_player("Ann").is_err());
        assert!(session.add_player(" ").is_err());
        assert!(session.update_player_field(PlayerId(42), Field::BuyIn, "1").is_err());
        assert!(session.remove_player(PlayerId(42)).is_none());
        assert!(log.borrow().is_empty());

        session.reset_all();
        assert!(!session.reset_all());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_observer_reads_post_mutation_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut session = Session::new();
        session.attach(move |_: &LedgerEvent, ledger: &Ledger| {
            sink.borrow_mut().push(ledger.verify().total);
        });

        let ann = session.add_player("Ann").unwrap().id();
        session.update_player_field(ann, Field::FinalStack, "30").unwrap();
        assert_eq!(*seen.borrow(), vec![0.0, 30.0]);
    }

    #[test]
    fn test_open_restores_and_autosaves() {
        let store = MemoryStore::new();
        store.insert(
            STORAGE_KEY,
            r#"{"players":[{"id":2,"name":"Ann","buyIn":10,"finalStack":40}],"nextId":5}"#,
        );

        let mut session = Session::open(store.clone());
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.observer_count(), 1);

        let bob = session.add_player("Bob").unwrap();
        assert_eq!(bob.id(), PlayerId(6));

        let reopened = Session::open(store);
        assert_eq!(reopened.ledger().players(), session.ledger().players());
        assert_eq!(reopened.ledger().id_counter(), 6);
    }

    #[test]
    fn test_open_with_corrupt_record() {
        let store = MemoryStore::new();
        store.insert(STORAGE_KEY, "garbage");
        let session = Session::open(store);
        assert!(session.ledger().is_empty());
        assert_eq!(session.ledger().id_counter(), 0);
    }

    #[test]
    fn test_restore_notifies() {
        let (mut session, log) = recorded_session();
        session.restore(None);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0], LedgerEvent::Restored { players: 0, next_id: 0 });
    }
}
