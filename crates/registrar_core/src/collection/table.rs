//! Copy-on-write collection of records.

use crate::config::IdAllocation;
use crate::entity::{IdAllocator, Record};
use crate::error::CatalogResult;
use crate::types::SequenceNumber;
use std::sync::Arc;

/// An ordered collection of records of one kind.
///
/// Rows are kept in insertion order behind an `Arc`. Readers take a
/// [`Table::snapshot`] and keep seeing that version no matter what
/// happens to the table afterwards; writers clone the rows only when a
/// snapshot is still alive.
///
/// Mutating methods are crate-private. Validation happens in the store
/// before any of them is called, so a table only ever changes by a whole
/// successful operation.
#[derive(Debug, Clone)]
pub struct Table<T: Record> {
    rows: Arc<Vec<T>>,
    version: SequenceNumber,
    ids: IdAllocator,
}

impl<T: Record> Table<T> {
    /// Creates an empty table.
    pub fn new(policy: IdAllocation) -> Self {
        Self::with_rows(policy, Vec::new())
    }

    /// Creates a table holding `rows`.
    pub fn with_rows(policy: IdAllocation, rows: Vec<T>) -> Self {
        let mut ids = IdAllocator::new(policy, T::KIND);
        for row in &rows {
            ids.observe(row.id());
        }
        Self {
            rows: Arc::new(rows),
            version: SequenceNumber::default(),
            ids,
        }
    }

    /// Returns the rows in insertion order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Returns a shared handle to the current version of the rows.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.rows)
    }

    /// Number of times this table has changed.
    pub fn version(&self) -> SequenceNumber {
        self.version
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a row by id.
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Returns true if a row with `id` exists.
    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Returns the id the next inserted row will get.
    pub fn next_id(&self) -> CatalogResult<T::Id> {
        self.ids.peek(self.rows.iter().map(Record::id))
    }

    pub(crate) fn insert(&mut self, row: T) {
        self.ids.observe(row.id());
        Arc::make_mut(&mut self.rows).push(row);
        self.bump();
    }

    /// Replaces the row with `id` by `f(row)`. Returns the new row, or
    /// `None` without touching the table if no row matches.
    pub(crate) fn update(&mut self, id: T::Id, f: impl FnOnce(&T) -> T) -> Option<T> {
        let index = self.rows.iter().position(|row| row.id() == id)?;
        let updated = f(&self.rows[index]);
        Arc::make_mut(&mut self.rows)[index] = updated.clone();
        self.bump();
        Some(updated)
    }

    /// Removes the row with `id`, preserving the order of the rest.
    pub(crate) fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.rows.iter().position(|row| row.id() == id)?;
        let removed = Arc::make_mut(&mut self.rows).remove(index);
        self.bump();
        Some(removed)
    }

    fn bump(&mut self) {
        self.version = self.version.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Course;
    use crate::types::CourseId;

    fn course(id: u32, name: &str) -> Course {
        Course {
            id: CourseId::new(id),
            name: name.into(),
        }
    }

    fn table() -> Table<Course> {
        Table::with_rows(
            IdAllocation::MaxPlusOne,
            vec![course(1, "Hindi"), course(2, "English")],
        )
    }

    #[test]
    fn snapshot_is_isolated_from_later_writes() {
        let mut table = table();
        let before = table.snapshot();

        table.insert(course(3, "Urdu"));

        assert_eq!(before.len(), 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn version_bumps_on_each_change() {
        let mut table = table();
        assert_eq!(table.version().as_u64(), 0);

        table.insert(course(3, "Urdu"));
        table.update(CourseId::new(3), |c| course(c.id.0, "Urdu II"));
        table.remove(CourseId::new(1));

        assert_eq!(table.version().as_u64(), 3);
    }

    #[test]
    fn update_missing_row_is_noop() {
        let mut table = table();
        let result = table.update(CourseId::new(9), |c| c.clone());
        assert!(result.is_none());
        assert_eq!(table.version().as_u64(), 0);
    }

    #[test]
    fn remove_preserves_order() {
        let mut table = table();
        table.insert(course(3, "Urdu"));
        table.remove(CourseId::new(2));

        let names: Vec<_> = table.rows().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Hindi", "Urdu"]);
    }

    #[test]
    fn next_id_follows_allocation_policy() {
        let mut reusing = table();
        reusing.remove(CourseId::new(2));
        assert_eq!(reusing.next_id().unwrap(), CourseId::new(2));

        let mut monotonic = Table::with_rows(
            IdAllocation::Monotonic,
            vec![course(1, "Hindi"), course(2, "English")],
        );
        monotonic.remove(CourseId::new(2));
        assert_eq!(monotonic.next_id().unwrap(), CourseId::new(3));
    }
}
