//! Snapshot collections.

mod table;

pub use table::Table;
