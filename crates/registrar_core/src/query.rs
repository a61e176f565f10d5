//! Lookups and filters over collection rows.
//!
//! All functions are pure and borrow the rows they are given, so they can
//! run against a live table or an old snapshot alike. Results keep the
//! insertion order of the input.

use crate::entity::{Course, CourseOffering, CourseType, NamedRecord, Record, StudentRegistration};
use crate::types::{CourseId, CourseTypeId, OfferingId};

/// Placeholder rendered for a side of an offering that no longer exists.
pub const MISSING_NAME: &str = "?";

/// Finds the row with `id`.
pub fn find_by_id<T: Record>(rows: &[T], id: T::Id) -> Option<&T> {
    rows.iter().find(|row| row.id() == id)
}

/// Offerings that pair with the given course type.
pub fn offerings_with_course_type(
    offerings: &[CourseOffering],
    id: CourseTypeId,
) -> impl Iterator<Item = &CourseOffering> {
    offerings.iter().filter(move |o| o.course_type_id == id)
}

/// Offerings of the given course.
pub fn offerings_with_course(
    offerings: &[CourseOffering],
    id: CourseId,
) -> impl Iterator<Item = &CourseOffering> {
    offerings.iter().filter(move |o| o.course_id == id)
}

/// Registrations against the given offering.
pub fn registrations_for_offering(
    registrations: &[StudentRegistration],
    offering_id: OfferingId,
) -> Vec<&StudentRegistration> {
    registrations
        .iter()
        .filter(|r| r.offering_id == offering_id)
        .collect()
}

/// Renders an offering as `"{course type} - {course}"`.
pub fn offering_display_name(
    offering: &CourseOffering,
    courses: &[Course],
    course_types: &[CourseType],
) -> String {
    let course_type = find_by_id(course_types, offering.course_type_id)
        .map_or(MISSING_NAME, |t| t.name.as_str());
    let course = find_by_id(courses, offering.course_id).map_or(MISSING_NAME, |c| c.name.as_str());
    format!("{course_type} - {course}")
}

/// Rows whose name contains `term`, ignoring case. An empty term matches
/// everything.
pub fn search_by_name<'a, T: NamedRecord>(rows: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| row.name().to_lowercase().contains(&needle))
        .collect()
}

/// Offerings whose display name contains `term`, ignoring case.
pub fn search_offerings<'a>(
    offerings: &'a [CourseOffering],
    courses: &[Course],
    course_types: &[CourseType],
    term: &str,
) -> Vec<&'a CourseOffering> {
    let needle = term.to_lowercase();
    offerings
        .iter()
        .filter(|o| {
            offering_display_name(o, courses, course_types)
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}
