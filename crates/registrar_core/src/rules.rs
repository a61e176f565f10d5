//! Integrity rules checked before a mutation is applied.
//!
//! Every rule is a pure check over the current rows. The store runs all
//! rules for an operation first and only then touches a collection, so a
//! failed rule leaves no trace.

use crate::entity::{CourseOffering, NamedRecord, StudentRegistration};
use crate::error::{CatalogError, CatalogResult};
use crate::query;
use crate::types::{CourseId, CourseTypeId, EntityKind, OfferingId};

/// Case-insensitive name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Fails with `DuplicateName` if any row other than `except` already
/// carries `name`, ignoring case.
pub fn ensure_unique_name<T: NamedRecord>(
    rows: &[T],
    name: &str,
    except: Option<T::Id>,
) -> CatalogResult<()> {
    let taken = rows
        .iter()
        .filter(|row| Some(row.id()) != except)
        .any(|row| names_match(row.name(), name));
    if taken {
        return Err(CatalogError::duplicate_name(T::KIND, name));
    }
    Ok(())
}

/// Trims `value` and fails with `Validation` if nothing is left.
pub fn require_text<'a>(
    field: &'static str,
    value: &'a str,
    message: impl Into<String>,
) -> CatalogResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation(field, message));
    }
    Ok(trimmed)
}

/// Fails with `Validation` if no offering was picked. Id `0` counts as
/// no selection.
pub fn require_offering(offering_id: Option<OfferingId>) -> CatalogResult<OfferingId> {
    offering_id
        .filter(|id| id.as_u32() != 0)
        .ok_or_else(|| CatalogError::validation("offering_id", "Course offering is required"))
}

/// Fails with `DuplicateCombination` if another offering already pairs
/// `course_id` with `course_type_id`. The pair is ordered.
pub fn ensure_unique_offering(
    offerings: &[CourseOffering],
    course_id: CourseId,
    course_type_id: CourseTypeId,
    except: Option<OfferingId>,
) -> CatalogResult<()> {
    let exists = offerings.iter().any(|o| {
        Some(o.id) != except && o.course_id == course_id && o.course_type_id == course_type_id
    });
    if exists {
        return Err(CatalogError::DuplicateCombination {
            course_id,
            course_type_id,
        });
    }
    Ok(())
}

/// Fails with `DuplicateRegistration` if `student_name` (already trimmed)
/// is registered for `offering_id`, ignoring case.
pub fn ensure_not_registered(
    registrations: &[StudentRegistration],
    student_name: &str,
    offering_id: OfferingId,
) -> CatalogResult<()> {
    let exists = registrations
        .iter()
        .any(|r| r.offering_id == offering_id && names_match(&r.student_name, student_name));
    if exists {
        return Err(CatalogError::DuplicateRegistration {
            student_name: student_name.to_owned(),
            offering_id,
        });
    }
    Ok(())
}

/// Fails with `InUse` while any offering references the course type.
pub fn ensure_course_type_unused(
    offerings: &[CourseOffering],
    id: CourseTypeId,
) -> CatalogResult<()> {
    let users = query::offerings_with_course_type(offerings, id).count();
    if users > 0 {
        return Err(CatalogError::in_use(EntityKind::CourseType, id.as_u32(), users));
    }
    Ok(())
}

/// Fails with `InUse` while any offering references the course.
pub fn ensure_course_unused(offerings: &[CourseOffering], id: CourseId) -> CatalogResult<()> {
    let users = query::offerings_with_course(offerings, id).count();
    if users > 0 {
        return Err(CatalogError::in_use(EntityKind::Course, id.as_u32(), users));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CourseType;
    use crate::types::RegistrationId;

    fn types() -> Vec<CourseType> {
        vec![
            CourseType {
                id: CourseTypeId::new(1),
                name: "Individual".into(),
            },
            CourseType {
                id: CourseTypeId::new(2),
                name: "Group".into(),
            },
        ]
    }

    fn offering(id: u32, course: u32, course_type: u32) -> CourseOffering {
        CourseOffering {
            id: OfferingId::new(id),
            course_id: CourseId::new(course),
            course_type_id: CourseTypeId::new(course_type),
        }
    }

    #[test]
    fn duplicate_name_ignores_case() {
        let err = ensure_unique_name(&types(), "GROUP", None).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateName {
                kind: EntityKind::CourseType,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_name_skips_record_being_edited() {
        assert!(ensure_unique_name(&types(), "group", Some(CourseTypeId::new(2))).is_ok());
        assert!(ensure_unique_name(&types(), "group", Some(CourseTypeId::new(1))).is_err());
    }

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("name", "  Bob ", "required").unwrap(), "Bob");
        assert!(require_text("name", "   ", "required").is_err());
    }

    #[test]
    fn zero_offering_counts_as_missing() {
        assert!(require_offering(None).is_err());
        assert!(require_offering(Some(OfferingId::new(0))).is_err());
        assert_eq!(
            require_offering(Some(OfferingId::new(2))).unwrap(),
            OfferingId::new(2)
        );
    }

    #[test]
    fn offering_pair_is_ordered() {
        let offerings = vec![offering(1, 1, 2)];
        assert!(
            ensure_unique_offering(&offerings, CourseId::new(1), CourseTypeId::new(2), None)
                .is_err()
        );
        assert!(
            ensure_unique_offering(&offerings, CourseId::new(2), CourseTypeId::new(1), None)
                .is_ok()
        );
    }

    #[test]
    fn offering_update_excludes_itself() {
        let offerings = vec![offering(1, 1, 2), offering(2, 3, 1)];
        let pair = (CourseId::new(1), CourseTypeId::new(2));
        assert!(ensure_unique_offering(&offerings, pair.0, pair.1, Some(OfferingId::new(1))).is_ok());
        assert!(ensure_unique_offering(&offerings, pair.0, pair.1, Some(OfferingId::new(2))).is_err());
    }

    #[test]
    fn registration_match_ignores_case() {
        let regs = vec![StudentRegistration {
            id: RegistrationId::new(1),
            student_name: "Alice".into(),
            offering_id: OfferingId::new(1),
        }];
        assert!(ensure_not_registered(&regs, "alice", OfferingId::new(1)).is_err());
        assert!(ensure_not_registered(&regs, "alice", OfferingId::new(2)).is_ok());
    }

    proptest::proptest! {
        #[test]
        fn names_match_ignores_ascii_case(name in "[a-zA-Z ]{1,12}") {
            proptest::prop_assert!(names_match(&name, &name.to_uppercase()));
            proptest::prop_assert!(names_match(&name.to_lowercase(), &name));
        }

        #[test]
        fn offering_pair_blocks_only_itself(course in 1u32..6, course_type in 1u32..6) {
            let offerings = vec![offering(1, course, course_type)];
            let same = ensure_unique_offering(
                &offerings,
                CourseId::new(course),
                CourseTypeId::new(course_type),
                None,
            );
            proptest::prop_assert!(same.is_err());
            let other = ensure_unique_offering(
                &offerings,
                CourseId::new(course + 1),
                CourseTypeId::new(course_type),
                None,
            );
            proptest::prop_assert!(other.is_ok());
        }
    }

    #[test]
    fn usage_guards_count_references() {
        let offerings = vec![offering(1, 1, 1), offering(2, 2, 1)];
        let err = ensure_course_type_unused(&offerings, CourseTypeId::new(1)).unwrap_err();
        assert_eq!(err, CatalogError::in_use(EntityKind::CourseType, 1, 2));
        assert!(ensure_course_type_unused(&offerings, CourseTypeId::new(3)).is_ok());
        assert!(ensure_course_unused(&offerings, CourseId::new(2)).is_err());
        assert!(ensure_course_unused(&offerings, CourseId::new(5)).is_ok());
    }
}
