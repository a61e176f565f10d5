//! Session command definitions and dispatch.

pub mod catalog;
pub mod dashboard;
pub mod offerings;
pub mod registrations;

use crate::error::CliError;
use clap::{Parser, Subcommand, ValueEnum};
use registrar_core::EntityStore;
use serde_json::Value;

/// One line of a session script.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

impl CommandLine {
    /// Parses a single script line.
    pub fn parse_line(line: &str) -> Result<Command, CliError> {
        let parsed = Self::try_parse_from(line.split_whitespace())?;
        Ok(parsed.command)
    }
}

/// Collections that can be listed.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    /// Course types
    CourseTypes,
    /// Courses
    Courses,
    /// Course offerings
    Offerings,
    /// Student registrations
    Registrations,
}

/// Commands accepted in a session.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show collection counts and recent entries
    Dashboard,

    /// List a collection
    List {
        /// Collection to list
        collection: Collection,

        /// Only offerings of this course type
        #[arg(short = 't', long = "type")]
        course_type: Option<u32>,

        /// Case-insensitive search term
        search: Vec<String>,
    },

    /// Add a course type
    AddCourseType {
        /// Name of the course type
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Rename a course type
    UpdateCourseType {
        /// Course type id
        id: u32,
        /// New name
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Delete a course type
    DeleteCourseType {
        /// Course type id
        id: u32,
    },

    /// Add a course
    AddCourse {
        /// Name of the course
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Rename a course
    UpdateCourse {
        /// Course id
        id: u32,
        /// New name
        #[arg(required = true)]
        name: Vec<String>,
    },

    /// Delete a course
    DeleteCourse {
        /// Course id
        id: u32,
    },

    /// Offer a course in a course type
    AddOffering {
        /// Course id
        course_id: u32,
        /// Course type id
        course_type_id: u32,
    },

    /// Change the course or course type of an offering
    UpdateOffering {
        /// Offering id
        id: u32,
        /// Course id
        course_id: u32,
        /// Course type id
        course_type_id: u32,
    },

    /// Delete an offering
    DeleteOffering {
        /// Offering id
        id: u32,
    },

    /// Register a student for an offering
    Register {
        /// Offering id
        offering_id: u32,
        /// Student name
        name: Vec<String>,
    },

    /// List the students registered for an offering
    Registrations {
        /// Offering id
        offering_id: u32,
    },

    /// Remove a registration
    Unregister {
        /// Registration id
        id: u32,
    },

    /// Show operation counters
    Stats,
}

/// Result of a command, rendered as text or JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// Human-readable output.
    pub text: String,
    /// Machine-readable output.
    pub data: Value,
}

impl Reply {
    /// Creates a reply.
    pub fn new(text: impl Into<String>, data: Value) -> Self {
        Self {
            text: text.into(),
            data,
        }
    }
}

/// Runs a parsed command against the store.
pub fn dispatch(store: &mut EntityStore, command: Command) -> Result<Reply, CliError> {
    match command {
        Command::Dashboard => dashboard::show(store),
        Command::Stats => dashboard::stats(store),
        Command::List {
            collection,
            course_type,
            search,
        } => {
            let term = search.join(" ");
            match collection {
                Collection::CourseTypes => catalog::list_course_types(store, &term),
                Collection::Courses => catalog::list_courses(store, &term),
                Collection::Offerings => offerings::list(store, course_type, &term),
                Collection::Registrations => registrations::list_all(store),
            }
        }
        Command::AddCourseType { name } => catalog::save_course_type(store, None, &name.join(" ")),
        Command::UpdateCourseType { id, name } => {
            catalog::save_course_type(store, Some(id), &name.join(" "))
        }
        Command::DeleteCourseType { id } => catalog::delete_course_type(store, id),
        Command::AddCourse { name } => catalog::save_course(store, None, &name.join(" ")),
        Command::UpdateCourse { id, name } => catalog::save_course(store, Some(id), &name.join(" ")),
        Command::DeleteCourse { id } => catalog::delete_course(store, id),
        Command::AddOffering {
            course_id,
            course_type_id,
        } => offerings::save(store, None, course_id, course_type_id),
        Command::UpdateOffering {
            id,
            course_id,
            course_type_id,
        } => offerings::save(store, Some(id), course_id, course_type_id),
        Command::DeleteOffering { id } => offerings::delete(store, id),
        Command::Register { offering_id, name } => {
            registrations::register(store, offering_id, &name.join(" "))
        }
        Command::Registrations { offering_id } => registrations::for_offering(store, offering_id),
        Command::Unregister { id } => registrations::delete(store, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multi_word_names() {
        let command = CommandLine::parse_line("add-course-type Small   Group").unwrap();
        assert_eq!(
            command,
            Command::AddCourseType {
                name: vec!["Small".into(), "Group".into()]
            }
        );
    }

    #[test]
    fn parses_list_with_type_filter() {
        let command = CommandLine::parse_line("list offerings --type 1 hindi").unwrap();
        assert_eq!(
            command,
            Command::List {
                collection: Collection::Offerings,
                course_type: Some(1),
                search: vec!["hindi".into()],
            }
        );
    }

    #[test]
    fn register_allows_missing_name() {
        let command = CommandLine::parse_line("register 1").unwrap();
        assert_eq!(
            command,
            Command::Register {
                offering_id: 1,
                name: Vec::new()
            }
        );
    }

    #[test]
    fn unknown_command_is_a_parse_error() {
        let err = CommandLine::parse_line("enroll 1 Alice").unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn bad_id_is_a_parse_error() {
        let err = CommandLine::parse_line("delete-course one").unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }
}
