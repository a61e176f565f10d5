//! Change feed for observing store mutations.
//!
//! The store has no implicit re-render hook. A presentation layer either
//! polls [`EntityStore::version`](crate::EntityStore::version) and re-reads
//! the collections, or subscribes here and reacts to individual events.
//!
//! # Usage
//!
//! ```rust,ignore
//! use registrar_core::EntityStore;
//!
//! let mut store = EntityStore::new();
//! let receiver = store.subscribe();
//!
//! store.add_course("Biology")?;
//!
//! while let Ok(event) = receiver.try_recv() {
//!     println!("{:?} {} {}", event.change_type, event.kind, event.id);
//! }
//! ```

use crate::types::{EntityKind, SequenceNumber};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};

/// Type of change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// A record was added.
    Insert,
    /// A record was changed in place.
    Update,
    /// A record was removed.
    Delete,
}

/// A single change event.
///
/// Events are emitted only for mutations that succeeded. Rejected
/// operations and updates of missing ids produce nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    /// Store sequence number after the change.
    pub sequence: SequenceNumber,
    /// Collection that changed.
    pub kind: EntityKind,
    /// Raw id of the affected record.
    pub id: u32,
    /// Type of change.
    pub change_type: ChangeType,
}

impl ChangeEvent {
    /// Creates an insert event.
    pub fn insert(sequence: SequenceNumber, kind: EntityKind, id: u32) -> Self {
        Self {
            sequence,
            kind,
            id,
            change_type: ChangeType::Insert,
        }
    }

    /// Creates an update event.
    pub fn update(sequence: SequenceNumber, kind: EntityKind, id: u32) -> Self {
        Self {
            sequence,
            kind,
            id,
            change_type: ChangeType::Update,
        }
    }

    /// Creates a delete event.
    pub fn delete(sequence: SequenceNumber, kind: EntityKind, id: u32) -> Self {
        Self {
            sequence,
            kind,
            id,
            change_type: ChangeType::Delete,
        }
    }
}

/// Distributes change events to subscribers and keeps a bounded history.
pub struct ChangeFeed {
    subscribers: RwLock<Vec<Sender<ChangeEvent>>>,
    history: RwLock<Vec<ChangeEvent>>,
    max_history: usize,
}

impl ChangeFeed {
    /// Creates a change feed with the default history limit.
    pub fn new() -> Self {
        Self::with_max_history(1000)
    }

    /// Creates a change feed with a specific history limit.
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
            max_history,
        }
    }

    /// Subscribes to the feed.
    ///
    /// The receiver gets every event emitted after this call.
    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.write().push(tx);
        rx
    }

    /// Records an event and sends it to every live subscriber.
    pub fn emit(&self, event: ChangeEvent) {
        {
            let mut history = self.history.write();
            history.push(event.clone());
            if history.len() > self.max_history {
                let to_remove = history.len() - self.max_history;
                history.drain(0..to_remove);
            }
        }

        // Dropped receivers are pruned here.
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Returns retained events with a sequence after `cursor`, up to
    /// `limit` of them.
    pub fn poll(&self, cursor: SequenceNumber, limit: usize) -> Vec<ChangeEvent> {
        let history = self.history.read();
        history
            .iter()
            .filter(|e| e.sequence > cursor)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns the latest sequence number in history.
    pub fn latest_sequence(&self) -> SequenceNumber {
        self.history
            .read()
            .last()
            .map(|e| e.sequence)
            .unwrap_or_default()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Returns the number of events in history.
    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeFeed")
            .field("subscribers", &self.subscriber_count())
            .field("history_len", &self.history_len())
            .field("max_history", &self.max_history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(seq: u64, id: u32) -> ChangeEvent {
        ChangeEvent::insert(SequenceNumber::new(seq), EntityKind::Course, id)
    }

    #[test]
    fn emit_and_receive() {
        let feed = ChangeFeed::new();
        let rx = feed.subscribe();

        let event = insert(1, 6);
        feed.emit(event.clone());

        assert_eq!(rx.try_recv().unwrap(), event);
    }

    #[test]
    fn multiple_subscribers() {
        let feed = ChangeFeed::new();
        let rx1 = feed.subscribe();
        let rx2 = feed.subscribe();

        let event = ChangeEvent::delete(SequenceNumber::new(1), EntityKind::CourseOffering, 2);
        feed.emit(event.clone());

        assert_eq!(rx1.recv().unwrap(), event);
        assert_eq!(rx2.recv().unwrap(), event);
    }

    #[test]
    fn subscriber_cleanup() {
        let feed = ChangeFeed::new();
        let rx = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 1);

        drop(rx);
        feed.emit(insert(1, 1));
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn poll_from_cursor() {
        let feed = ChangeFeed::new();
        for i in 1..=5 {
            feed.emit(insert(i, i as u32));
        }

        let events = feed.poll(SequenceNumber::new(2), 10);
        let seqs: Vec<_> = events.iter().map(|e| e.sequence.as_u64()).collect();
        assert_eq!(seqs, [3, 4, 5]);
        assert_eq!(feed.poll(SequenceNumber::default(), 2).len(), 2);
    }

    #[test]
    fn history_truncation() {
        let feed = ChangeFeed::with_max_history(5);
        for i in 1..=10 {
            feed.emit(insert(i, 1));
        }

        assert_eq!(feed.history_len(), 5);
        let events = feed.poll(SequenceNumber::default(), 100);
        assert_eq!(events[0].sequence, SequenceNumber::new(6));
        assert_eq!(feed.latest_sequence(), SequenceNumber::new(10));
    }
}
