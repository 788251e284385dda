//! In-memory data assembly.
//!
//! - record → table conversion (`table`)

pub mod table;

pub use table::Table;
