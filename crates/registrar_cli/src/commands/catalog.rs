//! Course type and course commands.

use super::Reply;
use crate::error::CliError;
use registrar_core::{CourseId, CourseTypeId, EntityStore, NamedRecord, RecordId};

/// Lists course types matching `term`.
pub fn list_course_types(store: &EntityStore, term: &str) -> Result<Reply, CliError> {
    let rows = store.search_course_types(term);
    Ok(Reply::new(name_table(&rows), serde_json::to_value(&rows)?))
}

/// Lists courses matching `term`.
pub fn list_courses(store: &EntityStore, term: &str) -> Result<Reply, CliError> {
    let rows = store.search_courses(term);
    Ok(Reply::new(name_table(&rows), serde_json::to_value(&rows)?))
}

/// Adds a course type, or renames one when `id` is given.
pub fn save_course_type(
    store: &mut EntityStore,
    id: Option<u32>,
    name: &str,
) -> Result<Reply, CliError> {
    let saved = store
        .save_course_type(id.map(CourseTypeId::new), name)?
        .ok_or_else(|| missing("course type", id))?;
    let verb = if id.is_some() { "Updated" } else { "Added" };
    Ok(Reply::new(
        format!("{verb} course type {}: {}", saved.id.as_u32(), saved.name),
        serde_json::to_value(&saved)?,
    ))
}

/// Deletes a course type.
pub fn delete_course_type(store: &mut EntityStore, id: u32) -> Result<Reply, CliError> {
    let removed = store
        .delete_course_type(CourseTypeId::new(id))?
        .ok_or_else(|| missing("course type", Some(id)))?;
    Ok(Reply::new(
        format!("Deleted course type {}: {}", id, removed.name),
        serde_json::to_value(&removed)?,
    ))
}

/// Adds a course, or renames one when `id` is given.
pub fn save_course(store: &mut EntityStore, id: Option<u32>, name: &str) -> Result<Reply, CliError> {
    let saved = store
        .save_course(id.map(CourseId::new), name)?
        .ok_or_else(|| missing("course", id))?;
    let verb = if id.is_some() { "Updated" } else { "Added" };
    Ok(Reply::new(
        format!("{verb} course {}: {}", saved.id.as_u32(), saved.name),
        serde_json::to_value(&saved)?,
    ))
}

/// Deletes a course.
pub fn delete_course(store: &mut EntityStore, id: u32) -> Result<Reply, CliError> {
    let removed = store
        .delete_course(CourseId::new(id))?
        .ok_or_else(|| missing("course", Some(id)))?;
    Ok(Reply::new(
        format!("Deleted course {}: {}", id, removed.name),
        serde_json::to_value(&removed)?,
    ))
}

fn name_table<T: NamedRecord>(rows: &[&T]) -> String {
    if rows.is_empty() {
        return "(none)".to_owned();
    }
    rows.iter()
        .map(|row| format!("{:>4}  {}", row.id().raw(), row.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn missing(what: &str, id: Option<u32>) -> CliError {
    CliError::NotFound(format!("{what} {}", id.unwrap_or_default()))
}
