//! Error types for the registrar store.

use crate::types::{CourseId, CourseTypeId, EntityKind, OfferingId};
use thiserror::Error;

/// Result type for store operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors returned by store operations.
///
/// Every error is raised before any collection is touched, so a failed
/// operation never leaves partial state behind. The `Display` output is
/// the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A required field is missing or empty.
    #[error("{message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// User-facing description.
        message: String,
    },

    /// A course type or course name collides with an existing entry.
    #[error("A {kind} with this name already exists")]
    DuplicateName {
        /// Which catalog the collision happened in.
        kind: EntityKind,
        /// The rejected name, as supplied.
        name: String,
    },

    /// A course offering with the same course and course type exists.
    #[error("This course offering already exists")]
    DuplicateCombination {
        /// Course half of the pair.
        course_id: CourseId,
        /// Course type half of the pair.
        course_type_id: CourseTypeId,
    },

    /// The student is already registered for the offering.
    #[error("Student already registered for this offering")]
    DuplicateRegistration {
        /// The rejected student name, trimmed.
        student_name: String,
        /// The offering registered against.
        offering_id: OfferingId,
    },

    /// A course type or course is still referenced by course offerings.
    #[error("Cannot delete {kind} that is being used in course offerings")]
    InUse {
        /// Kind of the entity whose deletion was blocked.
        kind: EntityKind,
        /// Raw id of the blocked entity.
        id: u32,
        /// Number of offerings that reference it.
        offerings: usize,
    },

    /// The id space of a collection is used up.
    #[error("no {kind} ids left to allocate")]
    IdsExhausted {
        /// Collection that ran out of ids.
        kind: EntityKind,
    },
}

impl CatalogError {
    /// Creates a validation error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Creates a duplicate name error.
    pub fn duplicate_name(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Creates an in-use error.
    pub fn in_use(kind: EntityKind, id: u32, offerings: usize) -> Self {
        Self::InUse {
            kind,
            id,
            offerings,
        }
    }

    /// Returns a short stable tag for the error variant.
    ///
    /// Used in log fields and machine-readable output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::DuplicateName { .. } => "duplicate_name",
            Self::DuplicateCombination { .. } => "duplicate_combination",
            Self::DuplicateRegistration { .. } => "duplicate_registration",
            Self::InUse { .. } => "in_use",
            Self::IdsExhausted { .. } => "ids_exhausted",
        }
    }
}
