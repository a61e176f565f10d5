//! Course offering commands.

use super::Reply;
use crate::error::CliError;
use registrar_core::{CourseId, CourseTypeId, EntityStore, OfferingId, OfferingRow};

/// Lists offerings, optionally limited to one course type, matching `term`
/// against the display name.
pub fn list(
    store: &EntityStore,
    course_type: Option<u32>,
    term: &str,
) -> Result<Reply, CliError> {
    let rows: Vec<OfferingRow> = store
        .search_offerings(term)
        .into_iter()
        .filter(|o| course_type.map_or(true, |t| o.course_type_id == CourseTypeId::new(t)))
        .map(|o| store.offering_row(o))
        .collect();

    let text = if rows.is_empty() {
        "(none)".to_owned()
    } else {
        rows.iter()
            .map(|row| format!("{:>4}  {}", row.id.as_u32(), row.display_name))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Reply::new(text, serde_json::to_value(&rows)?))
}

/// Adds an offering, or re-points one when `id` is given.
pub fn save(
    store: &mut EntityStore,
    id: Option<u32>,
    course_id: u32,
    course_type_id: u32,
) -> Result<Reply, CliError> {
    let saved = store
        .save_course_offering(
            id.map(OfferingId::new),
            Some(CourseId::new(course_id)),
            Some(CourseTypeId::new(course_type_id)),
        )?
        .ok_or_else(|| CliError::NotFound(format!("offering {}", id.unwrap_or_default())))?;

    let row = store.offering_row(&saved);
    let verb = if id.is_some() { "Updated" } else { "Added" };
    Ok(Reply::new(
        format!("{verb} offering {}: {}", row.id.as_u32(), row.display_name),
        serde_json::to_value(saved)?,
    ))
}

/// Deletes an offering.
pub fn delete(store: &mut EntityStore, id: u32) -> Result<Reply, CliError> {
    let name = store
        .get_course_offering_by_id(OfferingId::new(id))
        .map(|o| store.offering_display_name(o));
    let removed = store
        .delete_course_offering(OfferingId::new(id))
        .ok_or_else(|| CliError::NotFound(format!("offering {id}")))?;
    Ok(Reply::new(
        format!("Deleted offering {id}: {}", name.unwrap_or_default()),
        serde_json::to_value(removed)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_by_course_type() {
        let store = EntityStore::new();
        let reply = list(&store, Some(1), "").unwrap();
        assert_eq!(reply.text, "   1  Individual - Hindi\n   3  Individual - Urdu");
    }

    #[test]
    fn add_returns_new_offering() {
        let mut store = EntityStore::new();
        let reply = save(&mut store, None, 4, 1).unwrap();
        assert_eq!(reply.text, "Added offering 4: Individual - Mathematics");
        assert_eq!(
            reply.data,
            serde_json::json!({"id": 4, "courseId": 4, "courseTypeId": 1})
        );
    }

    #[test]
    fn duplicate_offering_is_rejected() {
        let mut store = EntityStore::new();
        let err = save(&mut store, None, 1, 1).unwrap_err();
        assert_eq!(err.to_string(), "This course offering already exists");
    }

    #[test]
    fn delete_missing_offering() {
        let mut store = EntityStore::new();
        let err = delete(&mut store, 9).unwrap_err();
        assert_eq!(err.to_string(), "offering 9 not found");
    }
}
