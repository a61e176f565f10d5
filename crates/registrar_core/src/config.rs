//! Store configuration.

/// How new record ids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdAllocation {
    /// `max(current ids, 0) + 1`, recomputed from the live collection.
    ///
    /// Deleting the highest id and inserting again hands out that id a
    /// second time.
    #[default]
    MaxPlusOne,
    /// Like `MaxPlusOne`, but never lower than the highest id ever issued
    /// by the collection, so ids are never reused within a session.
    Monotonic,
}

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether to load the built-in sample catalog on open.
    pub seed: bool,

    /// Id allocation policy shared by all four collections.
    pub id_allocation: IdAllocation,

    /// Minimum trimmed length of course and course type names accepted by
    /// form validation.
    pub min_name_len: usize,

    /// Number of change events retained for polling.
    pub change_history: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: true,
            id_allocation: IdAllocation::MaxPlusOne,
            min_name_len: 2,
            change_history: 1000,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to load the sample catalog.
    #[must_use]
    pub const fn seed(mut self, value: bool) -> Self {
        self.seed = value;
        self
    }

    /// Sets the id allocation policy.
    #[must_use]
    pub const fn id_allocation(mut self, policy: IdAllocation) -> Self {
        self.id_allocation = policy;
        self
    }

    /// Sets the minimum name length for form validation.
    #[must_use]
    pub const fn min_name_len(mut self, len: usize) -> Self {
        self.min_name_len = len;
        self
    }

    /// Sets how many change events are kept for polling.
    #[must_use]
    pub const fn change_history(mut self, len: usize) -> Self {
        self.change_history = len;
        self
    }
}
