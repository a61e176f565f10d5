//! Property-based test generators using proptest.
//!
//! Provides strategies for names and for random sequences of store
//! operations, plus the glue to replay them against a store.

use proptest::prelude::*;
use registrar_core::{
    CatalogResult, CourseId, CourseTypeId, EntityStore, OfferingId, RegistrationId,
};

/// Strategy for names that pass form validation: one or two capitalized
/// words.
pub fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][a-z]{1,8}( [A-Z][a-z]{1,8})?").expect("Invalid regex")
}

/// Strategy for strings that contain nothing but whitespace.
pub fn blank_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t]{0,6}").expect("Invalid regex")
}

/// Strategy for `name` with the case of each letter chosen at random.
pub fn case_variant_strategy(name: String) -> impl Strategy<Value = String> {
    let len = name.chars().count();
    prop::collection::vec(any::<bool>(), len).prop_map(move |flips| {
        name.chars()
            .zip(flips)
            .map(|(c, upper)| {
                if upper {
                    c.to_ascii_uppercase()
                } else {
                    c.to_ascii_lowercase()
                }
            })
            .collect()
    })
}

/// Strategy for small raw ids, so that generated operations hit existing
/// records often.
pub fn small_id_strategy() -> impl Strategy<Value = u32> {
    1u32..=8
}

/// A single store operation.
#[derive(Debug, Clone)]
pub enum StoreOperation {
    /// Add a course type
    AddCourseType {
        /// Requested name
        name: String,
    },
    /// Rename a course type
    UpdateCourseType {
        /// Course type id
        id: u32,
        /// New name
        name: String,
    },
    /// Delete a course type
    DeleteCourseType {
        /// Course type id
        id: u32,
    },
    /// Add a course
    AddCourse {
        /// Requested name
        name: String,
    },
    /// Rename a course
    UpdateCourse {
        /// Course id
        id: u32,
        /// New name
        name: String,
    },
    /// Delete a course
    DeleteCourse {
        /// Course id
        id: u32,
    },
    /// Add an offering
    AddOffering {
        /// Course id
        course_id: u32,
        /// Course type id
        course_type_id: u32,
    },
    /// Re-point an offering
    UpdateOffering {
        /// Offering id
        id: u32,
        /// Course id
        course_id: u32,
        /// Course type id
        course_type_id: u32,
    },
    /// Delete an offering
    DeleteOffering {
        /// Offering id
        id: u32,
    },
    /// Register a student
    Register {
        /// Student name
        name: String,
        /// Offering id
        offering_id: u32,
    },
    /// Delete a registration
    Unregister {
        /// Registration id
        id: u32,
    },
}

impl StoreOperation {
    /// Applies the operation. `Ok(false)` means the target id did not
    /// exist and nothing changed.
    pub fn apply(&self, store: &mut EntityStore) -> CatalogResult<bool> {
        match self {
            Self::AddCourseType { name } => store.add_course_type(name).map(|_| true),
            Self::UpdateCourseType { id, name } => Ok(store
                .update_course_type(CourseTypeId::new(*id), name)
                .is_some()),
            Self::DeleteCourseType { id } => store
                .delete_course_type(CourseTypeId::new(*id))
                .map(|r| r.is_some()),
            Self::AddCourse { name } => store.add_course(name).map(|_| true),
            Self::UpdateCourse { id, name } => {
                Ok(store.update_course(CourseId::new(*id), name).is_some())
            }
            Self::DeleteCourse { id } => store.delete_course(CourseId::new(*id)).map(|r| r.is_some()),
            Self::AddOffering {
                course_id,
                course_type_id,
            } => store
                .add_course_offering(CourseId::new(*course_id), CourseTypeId::new(*course_type_id))
                .map(|_| true),
            Self::UpdateOffering {
                id,
                course_id,
                course_type_id,
            } => store
                .update_course_offering(
                    OfferingId::new(*id),
                    CourseId::new(*course_id),
                    CourseTypeId::new(*course_type_id),
                )
                .map(|r| r.is_some()),
            Self::DeleteOffering { id } => {
                Ok(store.delete_course_offering(OfferingId::new(*id)).is_some())
            }
            Self::Register { name, offering_id } => store
                .register_student(name, Some(OfferingId::new(*offering_id)))
                .map(|_| true),
            Self::Unregister { id } => Ok(store.delete_registration(RegistrationId::new(*id)).is_some()),
        }
    }
}

/// Strategy for generating store operations.
pub fn operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        2 => name_strategy().prop_map(|name| StoreOperation::AddCourseType { name }),
        1 => (small_id_strategy(), name_strategy())
            .prop_map(|(id, name)| StoreOperation::UpdateCourseType { id, name }),
        1 => small_id_strategy().prop_map(|id| StoreOperation::DeleteCourseType { id }),
        2 => name_strategy().prop_map(|name| StoreOperation::AddCourse { name }),
        1 => (small_id_strategy(), name_strategy())
            .prop_map(|(id, name)| StoreOperation::UpdateCourse { id, name }),
        1 => small_id_strategy().prop_map(|id| StoreOperation::DeleteCourse { id }),
        3 => (small_id_strategy(), small_id_strategy()).prop_map(|(course_id, course_type_id)| {
            StoreOperation::AddOffering {
                course_id,
                course_type_id,
            }
        }),
        1 => (small_id_strategy(), small_id_strategy(), small_id_strategy()).prop_map(
            |(id, course_id, course_type_id)| StoreOperation::UpdateOffering {
                id,
                course_id,
                course_type_id,
            }
        ),
        1 => small_id_strategy().prop_map(|id| StoreOperation::DeleteOffering { id }),
        3 => (name_strategy(), small_id_strategy())
            .prop_map(|(name, offering_id)| StoreOperation::Register { name, offering_id }),
        1 => small_id_strategy().prop_map(|id| StoreOperation::Unregister { id }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn names_pass_length_rule(name in name_strategy()) {
            prop_assert!(name.trim().chars().count() >= 2);
            prop_assert_eq!(name.trim(), name.as_str());
        }

        #[test]
        fn case_variant_keeps_letters(
            (name, variant) in name_strategy()
                .prop_flat_map(|n| (Just(n.clone()), case_variant_strategy(n)))
        ) {
            prop_assert_eq!(name.to_lowercase(), variant.to_lowercase());
        }

        #[test]
        fn blanks_are_blank(s in blank_strategy()) {
            prop_assert!(s.trim().is_empty());
        }
    }
}
