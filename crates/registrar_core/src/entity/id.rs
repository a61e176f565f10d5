//! Record id allocation.

use crate::config::IdAllocation;
use crate::error::{CatalogError, CatalogResult};
use crate::types::{EntityKind, RecordId};

/// Chooses ids for new records of one collection.
///
/// The allocator only remembers the highest id it has handed out. The
/// live ids are passed in on every call, since `MaxPlusOne` derives the
/// next id from the current contents alone.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    policy: IdAllocation,
    kind: EntityKind,
    high_water: u32,
}

impl IdAllocator {
    /// Creates an allocator that has not issued any ids yet.
    pub fn new(policy: IdAllocation, kind: EntityKind) -> Self {
        Self {
            policy,
            kind,
            high_water: 0,
        }
    }

    /// Returns the allocation policy.
    pub fn policy(&self) -> IdAllocation {
        self.policy
    }

    /// Computes the id the next insert would receive.
    ///
    /// Does not reserve it; call [`IdAllocator::observe`] once the insert
    /// has been applied.
    pub fn peek<I: RecordId>(&self, live: impl IntoIterator<Item = I>) -> CatalogResult<I> {
        let max_live = live.into_iter().map(RecordId::raw).max().unwrap_or(0);
        let floor = match self.policy {
            IdAllocation::MaxPlusOne => max_live,
            IdAllocation::Monotonic => max_live.max(self.high_water),
        };
        floor
            .checked_add(1)
            .map(I::from_raw)
            .ok_or(CatalogError::IdsExhausted { kind: self.kind })
    }

    /// Records that `id` is in use.
    pub fn observe<I: RecordId>(&mut self, id: I) {
        self.high_water = self.high_water.max(id.raw());
    }

    /// Highest id observed so far.
    pub fn high_water(&self) -> u32 {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CourseId;

    fn ids(raw: &[u32]) -> Vec<CourseId> {
        raw.iter().copied().map(CourseId::new).collect()
    }

    #[test]
    fn empty_collection_starts_at_one() {
        let alloc = IdAllocator::new(IdAllocation::MaxPlusOne, EntityKind::Course);
        let id: CourseId = alloc.peek(Vec::new()).unwrap();
        assert_eq!(id, CourseId::new(1));
    }

    #[test]
    fn max_plus_one_ignores_gaps() {
        let alloc = IdAllocator::new(IdAllocation::MaxPlusOne, EntityKind::Course);
        assert_eq!(alloc.peek(ids(&[1, 7, 3])).unwrap(), CourseId::new(8));
    }

    #[test]
    fn max_plus_one_reuses_deleted_highest_id() {
        let mut alloc = IdAllocator::new(IdAllocation::MaxPlusOne, EntityKind::Course);
        alloc.observe(CourseId::new(5));
        assert_eq!(alloc.peek(ids(&[1, 2, 3, 4])).unwrap(), CourseId::new(5));
    }

    #[test]
    fn monotonic_never_goes_backwards() {
        let mut alloc = IdAllocator::new(IdAllocation::Monotonic, EntityKind::Course);
        alloc.observe(CourseId::new(5));
        assert_eq!(alloc.peek(ids(&[1, 2, 3, 4])).unwrap(), CourseId::new(6));
        assert_eq!(alloc.high_water(), 5);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let alloc = IdAllocator::new(IdAllocation::MaxPlusOne, EntityKind::Course);
        let err = alloc.peek(ids(&[u32::MAX])).unwrap_err();
        assert_eq!(
            err,
            CatalogError::IdsExhausted {
                kind: EntityKind::Course
            }
        );
    }
}
