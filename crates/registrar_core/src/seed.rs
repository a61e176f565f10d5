//! Sample catalog loaded into a fresh store.

use crate::entity::{Course, CourseOffering, CourseType};
use crate::types::{CourseId, CourseTypeId, OfferingId};

const COURSE_TYPES: [&str; 3] = ["Individual", "Group", "Special"];
const COURSES: [&str; 5] = ["Hindi", "English", "Urdu", "Mathematics", "Science"];
/// `(offering, course, course type)`
const OFFERINGS: [(u32, u32, u32); 3] = [(1, 1, 1), (2, 2, 2), (3, 3, 1)];

/// Course types numbered from 1 in declaration order.
pub fn course_types() -> Vec<CourseType> {
    COURSE_TYPES
        .iter()
        .zip(1..)
        .map(|(name, id)| CourseType {
            id: CourseTypeId::new(id),
            name: (*name).to_owned(),
        })
        .collect()
}

/// Courses numbered from 1 in declaration order.
pub fn courses() -> Vec<Course> {
    COURSES
        .iter()
        .zip(1..)
        .map(|(name, id)| Course {
            id: CourseId::new(id),
            name: (*name).to_owned(),
        })
        .collect()
}

/// Individual Hindi, Group English and Individual Urdu.
pub fn offerings() -> Vec<CourseOffering> {
    OFFERINGS
        .iter()
        .map(|&(id, course, course_type)| CourseOffering {
            id: OfferingId::new(id),
            course_id: CourseId::new(course),
            course_type_id: CourseTypeId::new(course_type),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_sequential() {
        let ids: Vec<_> = courses().iter().map(|c| c.id.as_u32()).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5]);
        assert_eq!(course_types()[2].name, "Special");
    }

    #[test]
    fn seed_offerings_reference_seed_entries() {
        let courses = courses();
        let types = course_types();
        for offering in offerings() {
            assert!(courses.iter().any(|c| c.id == offering.course_id));
            assert!(types.iter().any(|t| t.id == offering.course_type_id));
        }
    }
}
