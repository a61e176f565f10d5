//! Core type definitions for the registrar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer identifier of a record within its collection.
///
/// Ids are positive; `0` is never allocated and is treated as "absent"
/// wherever a caller may pass an unselected id.
pub trait RecordId: Copy + Eq + Ord + fmt::Debug + fmt::Display {
    /// Wraps a raw id value.
    fn from_raw(raw: u32) -> Self;

    /// Returns the raw id value.
    fn raw(self) -> u32;
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Creates an id from its raw value.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Returns the raw id value.
            #[must_use]
            pub const fn as_u32(self) -> u32 {
                self.0
            }
        }

        impl RecordId for $name {
            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a course type.
    CourseTypeId,
    "type"
);
record_id!(
    /// Identifier of a course.
    CourseId,
    "course"
);
record_id!(
    /// Identifier of a course offering.
    OfferingId,
    "offering"
);
record_id!(
    /// Identifier of a student registration.
    RegistrationId,
    "reg"
);

/// Sequence number for ordering mutations.
///
/// Every successful mutation advances the store's sequence by one.
/// Higher sequence numbers indicate later changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SequenceNumber(pub u64);

impl SequenceNumber {
    /// Creates a new sequence number.
    #[must_use]
    pub const fn new(seq: u64) -> Self {
        Self(seq)
    }

    /// Returns the raw sequence value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the next sequence number.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq:{}", self.0)
    }
}

/// The four kinds of entity held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A course format such as "Group".
    CourseType,
    /// A subject such as "Mathematics".
    Course,
    /// A course paired with a course type.
    CourseOffering,
    /// A student enrolled in an offering.
    StudentRegistration,
}

impl EntityKind {
    /// Lowercase label used inside sentences.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CourseType => "course type",
            Self::Course => "course",
            Self::CourseOffering => "course offering",
            Self::StudentRegistration => "student registration",
        }
    }

    /// Capitalized label used at the start of a message.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CourseType => "Course type",
            Self::Course => "Course",
            Self::CourseOffering => "Course offering",
            Self::StudentRegistration => "Student registration",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_carries_prefix() {
        assert_eq!(CourseTypeId::new(3).to_string(), "type:3");
        assert_eq!(OfferingId::new(12).to_string(), "offering:12");
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&CourseId::new(4)).unwrap();
        assert_eq!(json, "4");
    }

    #[test]
    fn sequence_number_next() {
        let s1 = SequenceNumber::new(5);
        assert_eq!(s1.next().as_u64(), 6);
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EntityKind::CourseType.to_string(), "course type");
        assert_eq!(EntityKind::Course.title(), "Course");
    }
}
