//! Entity types and id allocation.

mod id;
mod model;

pub use id::IdAllocator;
pub use model::{Course, CourseOffering, CourseType, NamedRecord, Record, StudentRegistration};
