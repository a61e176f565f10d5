//! Store statistics.
//!
//! Counters are atomic so a shared reference is enough to record into
//! them, even though the store itself is driven from a single thread.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for a store.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Records added.
    inserts: AtomicU64,
    /// Records changed in place.
    updates: AtomicU64,
    /// Records removed.
    deletes: AtomicU64,
    /// Operations rejected by an integrity or validation rule.
    rejections: AtomicU64,
}

impl StoreStats {
    /// Creates a zeroed stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of records added.
    pub fn inserts(&self) -> u64 {
        self.inserts.load(Ordering::Relaxed)
    }

    /// Returns the number of records changed.
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Returns the number of records removed.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected operations.
    pub fn rejections(&self) -> u64 {
        self.rejections.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            inserts: self.inserts(),
            updates: self.updates(),
            deletes: self.deletes(),
            rejections: self.rejections(),
        }
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    /// Records added.
    pub inserts: u64,
    /// Records changed in place.
    pub updates: u64,
    /// Records removed.
    pub deletes: u64,
    /// Rejected operations.
    pub rejections: u64,
}
