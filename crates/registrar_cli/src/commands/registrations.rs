//! Student registration commands.

use super::Reply;
use crate::error::CliError;
use registrar_core::{EntityStore, OfferingId, RegistrationId, RegistrationRow};

/// Registers a student. An offering id of `0` means none was chosen.
pub fn register(store: &mut EntityStore, offering_id: u32, name: &str) -> Result<Reply, CliError> {
    let registration = store.register_student(name, Some(OfferingId::new(offering_id)))?;
    let row = store.registration_row(&registration);
    Ok(Reply::new(
        format!(
            "Registered {} for {} (registration {})",
            row.student_name,
            row.offering,
            row.id.as_u32()
        ),
        serde_json::to_value(&registration)?,
    ))
}

/// Lists the students registered for one offering.
pub fn for_offering(store: &EntityStore, offering_id: u32) -> Result<Reply, CliError> {
    let rows: Vec<RegistrationRow> = store
        .get_registrations_for_offering(OfferingId::new(offering_id))
        .into_iter()
        .map(|r| store.registration_row(r))
        .collect();
    Ok(Reply::new(render(&rows), serde_json::to_value(&rows)?))
}

/// Lists every registration.
pub fn list_all(store: &EntityStore) -> Result<Reply, CliError> {
    let rows: Vec<RegistrationRow> = store
        .student_registrations()
        .rows()
        .iter()
        .map(|r| store.registration_row(r))
        .collect();
    Ok(Reply::new(render(&rows), serde_json::to_value(&rows)?))
}

/// Removes a registration.
pub fn delete(store: &mut EntityStore, id: u32) -> Result<Reply, CliError> {
    let removed = store
        .delete_registration(RegistrationId::new(id))
        .ok_or_else(|| CliError::NotFound(format!("registration {id}")))?;
    Ok(Reply::new(
        format!("Removed registration {id}: {}", removed.student_name),
        serde_json::to_value(&removed)?,
    ))
}

fn render(rows: &[RegistrationRow]) -> String {
    if rows.is_empty() {
        return "(none)".to_owned();
    }
    rows.iter()
        .map(|row| format!("{:>4}  {}  [{}]", row.id.as_u32(), row.student_name, row.offering))
        .collect::<Vec<_>>()
        .join("\n")
}
