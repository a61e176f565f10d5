//! # Registrar Testkit
//!
//! Test utilities for the registrar store.
//!
//! This crate provides:
//! - Store fixtures (seeded, empty, populated)
//! - Property-based test generators using proptest
//! - An invariant checker for whole-store consistency
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registrar_testkit::prelude::*;
//!
//! #[test]
//! fn offerings_survive_renames() {
//!     with_seeded_store(|store| {
//!         store.update_course(CourseId::new(1), "Sanskrit");
//!         assert_invariants(store);
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod invariants;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::invariants::*;
    pub use registrar_core::{
        CatalogError, CourseId, CourseTypeId, EntityStore, OfferingId, RegistrationId,
        StoreConfig,
    };
}

pub use fixtures::*;
pub use generators::*;
pub use invariants::*;
