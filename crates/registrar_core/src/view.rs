//! Read models for presentation: dashboard summary and display rows.

use crate::entity::{CourseOffering, StudentRegistration};
use crate::store::EntityStore;
use crate::types::{CourseId, CourseTypeId, OfferingId, RegistrationId};
use serde::Serialize;

/// Number of entries shown in each "recent" list of the dashboard.
pub const RECENT_LIMIT: usize = 3;

/// Collection counts and the first few entries of each catalog list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Number of course types.
    pub course_types: usize,
    /// Number of courses.
    pub courses: usize,
    /// Number of course offerings.
    pub course_offerings: usize,
    /// Number of student registrations.
    pub student_registrations: usize,
    /// Names of the first course types.
    pub recent_course_types: Vec<String>,
    /// Names of the first courses.
    pub recent_courses: Vec<String>,
    /// Display names of the first offerings.
    pub recent_offerings: Vec<String>,
}

/// An offering joined with the names of its course and course type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferingRow {
    /// Offering id.
    pub id: OfferingId,
    /// Course id.
    pub course_id: CourseId,
    /// Course type id.
    pub course_type_id: CourseTypeId,
    /// `"{course type} - {course}"`.
    pub display_name: String,
}

/// A registration joined with its offering's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRow {
    /// Registration id.
    pub id: RegistrationId,
    /// Student name.
    pub student_name: String,
    /// Offering id.
    pub offering_id: OfferingId,
    /// Display name of the offering, `?` parts if it was deleted.
    pub offering: String,
}

impl EntityStore {
    /// Builds the dashboard summary.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            course_types: self.course_types().len(),
            courses: self.courses().len(),
            course_offerings: self.course_offerings().len(),
            student_registrations: self.student_registrations().len(),
            recent_course_types: self
                .course_types()
                .rows()
                .iter()
                .take(RECENT_LIMIT)
                .map(|t| t.name.clone())
                .collect(),
            recent_courses: self
                .courses()
                .rows()
                .iter()
                .take(RECENT_LIMIT)
                .map(|c| c.name.clone())
                .collect(),
            recent_offerings: self
                .course_offerings()
                .rows()
                .iter()
                .take(RECENT_LIMIT)
                .map(|o| self.offering_display_name(o))
                .collect(),
        }
    }

    /// Joins an offering with its display name.
    pub fn offering_row(&self, offering: &CourseOffering) -> OfferingRow {
        OfferingRow {
            id: offering.id,
            course_id: offering.course_id,
            course_type_id: offering.course_type_id,
            display_name: self.offering_display_name(offering),
        }
    }

    /// Joins a registration with its offering's display name.
    pub fn registration_row(&self, registration: &StudentRegistration) -> RegistrationRow {
        let offering = match self.get_course_offering_by_id(registration.offering_id) {
            Some(offering) => self.offering_display_name(offering),
            None => format!("{} (deleted)", registration.offering_id),
        };
        RegistrationRow {
            id: registration.id,
            student_name: registration.student_name.clone(),
            offering_id: registration.offering_id,
            offering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    #[test]
    fn dashboard_of_sample_catalog() {
        let store = EntityStore::new();
        let dashboard = store.dashboard();

        assert_eq!(dashboard.course_types, 3);
        assert_eq!(dashboard.courses, 5);
        assert_eq!(dashboard.course_offerings, 3);
        assert_eq!(dashboard.student_registrations, 0);
        assert_eq!(dashboard.recent_courses, ["Hindi", "English", "Urdu"]);
        assert_eq!(
            dashboard.recent_offerings,
            ["Individual - Hindi", "Group - English", "Individual - Urdu"]
        );
    }

    #[test]
    fn dashboard_of_empty_store() {
        let store = EntityStore::open(StoreConfig::new().seed(false));
        let dashboard = store.dashboard();
        assert_eq!(dashboard.courses, 0);
        assert!(dashboard.recent_offerings.is_empty());
    }

    #[test]
    fn registration_row_survives_offering_deletion() {
        let mut store = EntityStore::new();
        let reg = store.register_student("Dana", Some(OfferingId::new(3))).unwrap();
        assert_eq!(store.registration_row(&reg).offering, "Individual - Urdu");

        store.delete_course_offering(OfferingId::new(3)).unwrap();
        assert_eq!(store.registration_row(&reg).offering, "offering:3 (deleted)");
    }

    #[test]
    fn offering_row_carries_display_name() {
        let store = EntityStore::new();
        let offering = *store.get_course_offering_by_id(OfferingId::new(2)).unwrap();
        let row = store.offering_row(&offering);
        assert_eq!(row.display_name, "Group - English");
        assert_eq!(row.course_type_id, CourseTypeId::new(2));
    }
}
