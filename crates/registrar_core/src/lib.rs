//! # Registrar Core
//!
//! In-memory data layer for a course registration catalog.
//!
//! This crate provides:
//! - An entity store owning course types, courses, course offerings and
//!   student registrations
//! - Integrity rules enforced on every create, update and delete
//! - Query helpers for id lookups, foreign-key filters and search
//! - Form pre-validation and dashboard read models for a presentation layer
//! - A change feed and version counter for observing mutations
//!
//! All state lives for the lifetime of one [`EntityStore`]; nothing is
//! persisted.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod change_feed;
mod collection;
mod config;
mod entity;
mod error;
pub mod form;
pub mod query;
pub mod rules;
pub mod seed;
mod stats;
mod store;
mod types;
mod view;

pub use change_feed::{ChangeEvent, ChangeFeed, ChangeType};
pub use collection::Table;
pub use config::{IdAllocation, StoreConfig};
pub use entity::{
    Course, CourseOffering, CourseType, IdAllocator, NamedRecord, Record, StudentRegistration,
};
pub use error::{CatalogError, CatalogResult};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::EntityStore;
pub use types::{
    CourseId, CourseTypeId, EntityKind, OfferingId, RecordId, RegistrationId, SequenceNumber,
};
pub use view::{Dashboard, OfferingRow, RegistrationRow, RECENT_LIMIT};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
