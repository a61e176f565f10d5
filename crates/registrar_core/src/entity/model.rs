//! Record types for the four collections.
//!
//! Offerings and registrations refer to their parents by id only, so a
//! parent can never be dropped out from under a child reference; its
//! deletion is either blocked or left to the caller.

use crate::types::{CourseId, CourseTypeId, EntityKind, OfferingId, RecordId, RegistrationId};
use serde::{Deserialize, Serialize};

/// A record stored in a collection.
pub trait Record: Clone {
    /// Id type of the record.
    type Id: RecordId;

    /// Kind of entity this record represents.
    const KIND: EntityKind;

    /// Returns the record's id.
    fn id(&self) -> Self::Id;
}

/// A record identified to users by a unique, case-insensitive name.
pub trait NamedRecord: Record {
    /// Builds a record from its parts.
    fn named(id: Self::Id, name: String) -> Self;

    /// Returns the display name.
    fn name(&self) -> &str;

    /// Returns a copy of the record with its name replaced.
    #[must_use]
    fn renamed(&self, name: String) -> Self {
        Self::named(self.id(), name)
    }
}

/// A course format such as "Individual" or "Group".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseType {
    /// Unique id within course types.
    pub id: CourseTypeId,
    /// Display name.
    pub name: String,
}

/// A subject in the catalog such as "Mathematics".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique id within courses.
    pub id: CourseId,
    /// Display name.
    pub name: String,
}

/// One course paired with one course type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseOffering {
    /// Unique id within offerings.
    pub id: OfferingId,
    /// The course being offered.
    pub course_id: CourseId,
    /// The format it is offered in.
    pub course_type_id: CourseTypeId,
}

/// A named student enrolled in a course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    /// Unique id within registrations.
    pub id: RegistrationId,
    /// Student name, trimmed, original case preserved.
    pub student_name: String,
    /// The offering registered for.
    pub offering_id: OfferingId,
}

impl Record for CourseType {
    type Id = CourseTypeId;
    const KIND: EntityKind = EntityKind::CourseType;

    fn id(&self) -> CourseTypeId {
        self.id
    }
}

impl NamedRecord for CourseType {
    fn named(id: CourseTypeId, name: String) -> Self {
        Self { id, name }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Course {
    type Id = CourseId;
    const KIND: EntityKind = EntityKind::Course;

    fn id(&self) -> CourseId {
        self.id
    }
}

impl NamedRecord for Course {
    fn named(id: CourseId, name: String) -> Self {
        Self { id, name }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for CourseOffering {
    type Id = OfferingId;
    const KIND: EntityKind = EntityKind::CourseOffering;

    fn id(&self) -> OfferingId {
        self.id
    }
}

impl Record for StudentRegistration {
    type Id = RegistrationId;
    const KIND: EntityKind = EntityKind::StudentRegistration;

    fn id(&self) -> RegistrationId {
        self.id
    }
}
