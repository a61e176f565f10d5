//! Whole-store consistency checks.
//!
//! These hold after any sequence of store operations, accepted or
//! rejected. Name uniqueness is not among them: plain renames skip the
//! duplicate check, so it is only checked by [`check_unique_names`].

use registrar_core::{EntityStore, NamedRecord, Record, RecordId};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

fn unique_ids<T: Record>(label: &str, rows: &[T]) -> Result<(), String>
where
    T::Id: Hash + Eq + Debug,
{
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        let id = row.id();
        if id.raw() == 0 {
            return Err(format!("{label}: id 0 issued"));
        }
        if !seen.insert(id) {
            return Err(format!("{label}: id {id:?} appears twice"));
        }
    }
    Ok(())
}

/// Checks the invariants that every store state upholds.
///
/// - ids are positive and unique within each collection
/// - no two offerings share a `(course, course type)` pair
/// - no student is registered twice for one offering, ignoring case
pub fn check_invariants(store: &EntityStore) -> Result<(), String> {
    unique_ids("course types", store.course_types().rows())?;
    unique_ids("courses", store.courses().rows())?;
    unique_ids("offerings", store.course_offerings().rows())?;
    unique_ids("registrations", store.student_registrations().rows())?;

    let mut pairs = HashSet::new();
    for offering in store.course_offerings().rows() {
        if !pairs.insert((offering.course_id, offering.course_type_id)) {
            return Err(format!(
                "offering pair ({}, {}) appears twice",
                offering.course_id, offering.course_type_id
            ));
        }
    }

    let mut registered = HashSet::new();
    for registration in store.student_registrations().rows() {
        let key = (registration.student_name.to_lowercase(), registration.offering_id);
        if !registered.insert(key) {
            return Err(format!(
                "{} registered twice for {}",
                registration.student_name, registration.offering_id
            ));
        }
    }

    Ok(())
}

/// Checks that course and course type names are unique ignoring case.
/// Holds for stores only mutated through adds and `save_*` calls.
pub fn check_unique_names(store: &EntityStore) -> Result<(), String> {
    fn names<T: NamedRecord>(label: &str, rows: &[T]) -> Result<(), String> {
        let mut seen = HashSet::new();
        for row in rows {
            if !seen.insert(row.name().to_lowercase()) {
                return Err(format!("{label}: name {:?} appears twice", row.name()));
            }
        }
        Ok(())
    }
    names("course types", store.course_types().rows())?;
    names("courses", store.courses().rows())
}

/// Panics with the violation if [`check_invariants`] fails.
pub fn assert_invariants(store: &EntityStore) {
    if let Err(violation) = check_invariants(store) {
        panic!("store invariant violated: {violation}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{scenarios, seeded_store};

    #[test]
    fn seeded_store_is_consistent() {
        let store = seeded_store();
        assert!(check_invariants(&store).is_ok());
        assert!(check_unique_names(&store).is_ok());
    }

    #[test]
    fn plain_rename_can_duplicate_names() {
        let mut store = scenarios::full_grid(2);
        store.update_course(registrar_core::CourseId::new(2), "course 1");
        assert_invariants(&store);
        assert!(check_unique_names(&store).is_err());
    }
}
