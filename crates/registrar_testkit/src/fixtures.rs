//! Store fixtures.
//!
//! Convenience constructors for the store states tests start from.

use registrar_core::{
    CourseId, CourseTypeId, EntityStore, IdAllocation, OfferingId, StoreConfig,
};

/// A store loaded with the sample catalog.
pub fn seeded_store() -> EntityStore {
    EntityStore::open(StoreConfig::default())
}

/// A store with four empty collections.
pub fn empty_store() -> EntityStore {
    EntityStore::open(StoreConfig::new().seed(false))
}

/// A seeded store that never reuses ids.
pub fn monotonic_store() -> EntityStore {
    EntityStore::open(StoreConfig::new().id_allocation(IdAllocation::Monotonic))
}

/// Runs `f` against a fresh seeded store.
///
/// # Example
///
/// ```rust,ignore
/// use registrar_testkit::with_seeded_store;
///
/// with_seeded_store(|store| {
///     assert_eq!(store.courses().len(), 5);
/// });
/// ```
pub fn with_seeded_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut EntityStore) -> R,
{
    let mut store = seeded_store();
    f(&mut store)
}

/// Runs `f` against a fresh empty store.
pub fn with_empty_store<F, R>(f: F) -> R
where
    F: FnOnce(&mut EntityStore) -> R,
{
    let mut store = empty_store();
    f(&mut store)
}

/// Pre-populated store states.
pub mod scenarios {
    use super::*;

    /// An empty store with `count` course types and `count` courses, named
    /// `Type N` and `Course N`, and every course offered as every type.
    pub fn full_grid(count: u32) -> EntityStore {
        let mut store = empty_store();
        for n in 1..=count {
            store
                .add_course_type(&format!("Type {n}"))
                .expect("Failed to add course type");
            store
                .add_course(&format!("Course {n}"))
                .expect("Failed to add course");
        }
        for course in 1..=count {
            for course_type in 1..=count {
                store
                    .add_course_offering(CourseId::new(course), CourseTypeId::new(course_type))
                    .expect("Failed to add offering");
            }
        }
        store
    }

    /// A seeded store with the given students registered for offering 1.
    pub fn with_registrations(students: &[&str]) -> EntityStore {
        let mut store = seeded_store();
        for name in students {
            store
                .register_student(name, Some(OfferingId::new(1)))
                .expect("Failed to register student");
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_and_empty_fixtures() {
        let seeded = seeded_store();
        assert_eq!(seeded.course_types().len(), 3);
        assert_eq!(seeded.course_offerings().len(), 3);

        let empty = empty_store();
        assert!(empty.courses().is_empty());
        assert!(empty.student_registrations().is_empty());
    }

    #[test]
    fn full_grid_scenario() {
        let store = scenarios::full_grid(3);
        assert_eq!(store.course_offerings().len(), 9);
    }

    #[test]
    fn registrations_scenario() {
        let store = scenarios::with_registrations(&["Ann", "Bob"]);
        assert_eq!(store.get_registrations_for_offering(OfferingId::new(1)).len(), 2);
    }

    #[test]
    fn closure_helpers() {
        let added = with_empty_store(|store| store.add_course("Biology").map(|c| c.id));
        assert_eq!(added.unwrap(), CourseId::new(1));
        with_seeded_store(|store| assert!(store.get_course_by_id(CourseId::new(5)).is_some()));
    }
}
