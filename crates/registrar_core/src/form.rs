//! Form checks run before calling the store.
//!
//! The store validates only what it must to keep its invariants. These
//! checks cover the stricter input rules of the editing screens: required
//! fields, a minimum name length, and duplicate names when renaming.

use crate::entity::NamedRecord;
use crate::error::{CatalogError, CatalogResult};
use crate::rules;
use crate::types::{CourseId, CourseTypeId, RecordId};

/// Validates a course or course type name typed into a form.
///
/// `editing` is the record being renamed, if any; it does not count as a
/// duplicate of itself. Returns the trimmed name.
pub fn validate_catalog_name<T: NamedRecord>(
    input: &str,
    existing: &[T],
    editing: Option<T::Id>,
    min_len: usize,
) -> CatalogResult<String> {
    let title = T::KIND.title();
    let name = rules::require_text("name", input, format!("{title} name is required"))?;
    if name.chars().count() < min_len {
        return Err(CatalogError::validation(
            "name",
            format!("{title} name must be at least {min_len} characters long"),
        ));
    }
    rules::ensure_unique_name(existing, name, editing)?;
    Ok(name.to_owned())
}

/// Validates the two drop-downs of the offering form. Id `0` counts as
/// nothing selected.
pub fn validate_offering_selection(
    course_id: Option<CourseId>,
    course_type_id: Option<CourseTypeId>,
) -> CatalogResult<(CourseId, CourseTypeId)> {
    let course_id = selected(course_id)
        .ok_or_else(|| CatalogError::validation("course_id", "Please select a course"))?;
    let course_type_id = selected(course_type_id)
        .ok_or_else(|| CatalogError::validation("course_type_id", "Please select a course type"))?;
    Ok((course_id, course_type_id))
}

fn selected<I: RecordId>(id: Option<I>) -> Option<I> {
    id.filter(|id| id.raw() != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Course, CourseType};
    use crate::seed;

    #[test]
    fn name_is_required() {
        let err = validate_catalog_name::<CourseType>("   ", &[], None, 2).unwrap_err();
        assert_eq!(err.to_string(), "Course type name is required");
    }

    #[test]
    fn name_must_meet_minimum_length() {
        let err = validate_catalog_name::<Course>(" A ", &[], None, 2).unwrap_err();
        assert_eq!(err.to_string(), "Course name must be at least 2 characters long");
    }

    #[test]
    fn name_is_trimmed() {
        let name = validate_catalog_name::<Course>("  Biology ", &seed::courses(), None, 2).unwrap();
        assert_eq!(name, "Biology");
    }

    #[test]
    fn rename_to_own_name_in_other_case_is_allowed() {
        let courses = seed::courses();
        let name = validate_catalog_name("hindi", &courses, Some(CourseId::new(1)), 2).unwrap();
        assert_eq!(name, "hindi");

        let err = validate_catalog_name("hindi", &courses, Some(CourseId::new(2)), 2).unwrap_err();
        assert_eq!(err.to_string(), "A course with this name already exists");
    }

    #[test]
    fn offering_selection_requires_both_ids() {
        let err = validate_offering_selection(None, Some(CourseTypeId::new(1))).unwrap_err();
        assert_eq!(err.to_string(), "Please select a course");

        let err = validate_offering_selection(Some(CourseId::new(1)), Some(CourseTypeId::new(0)))
            .unwrap_err();
        assert_eq!(err.to_string(), "Please select a course type");

        assert_eq!(
            validate_offering_selection(Some(CourseId::new(4)), Some(CourseTypeId::new(1))).unwrap(),
            (CourseId::new(4), CourseTypeId::new(1))
        );
    }
}
