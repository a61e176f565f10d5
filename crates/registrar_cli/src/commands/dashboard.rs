//! Dashboard and statistics commands.

use super::Reply;
use crate::error::CliError;
use registrar_core::EntityStore;

/// Shows collection counts and the first entries of each catalog list.
pub fn show(store: &EntityStore) -> Result<Reply, CliError> {
    let dashboard = store.dashboard();
    let recent = |names: &[String]| {
        if names.is_empty() {
            "none yet".to_owned()
        } else {
            names.join(", ")
        }
    };

    let text = format!(
        "Course types:   {}\nCourses:        {}\nOfferings:      {}\nRegistrations:  {}\n\
         Recent course types: {}\nRecent courses:      {}\nRecent offerings:    {}",
        dashboard.course_types,
        dashboard.courses,
        dashboard.course_offerings,
        dashboard.student_registrations,
        recent(&dashboard.recent_course_types),
        recent(&dashboard.recent_courses),
        recent(&dashboard.recent_offerings),
    );
    Ok(Reply::new(text, serde_json::to_value(&dashboard)?))
}

/// Shows operation counters and the store version.
pub fn stats(store: &EntityStore) -> Result<Reply, CliError> {
    let snapshot = store.stats().snapshot();
    let text = format!(
        "Version:    {}\nInserts:    {}\nUpdates:    {}\nDeletes:    {}\nRejections: {}",
        store.version().as_u64(),
        snapshot.inserts,
        snapshot.updates,
        snapshot.deletes,
        snapshot.rejections,
    );
    let mut data = serde_json::to_value(&snapshot)?;
    if let Some(map) = data.as_object_mut() {
        map.insert("version".to_owned(), store.version().as_u64().into());
    }
    Ok(Reply::new(text, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_text_lists_recent_entries() {
        let store = EntityStore::new();
        let reply = show(&store).unwrap();
        assert!(reply.text.contains("Courses:        5"));
        assert!(reply.text.contains("Recent courses:      Hindi, English, Urdu"));
        assert_eq!(reply.data["courseOfferings"], 3);
    }

    #[test]
    fn stats_include_version() {
        let mut store = EntityStore::new();
        store.add_course("Biology").unwrap();
        let _ = store.add_course("biology");

        let reply = stats(&store).unwrap();
        assert_eq!(reply.data["version"], 1);
        assert_eq!(reply.data["inserts"], 1);
        assert_eq!(reply.data["rejections"], 1);
    }
}
