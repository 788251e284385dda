//! Input/output helpers.
//!
//! - pattern matching + newest-artifact discovery (`locate`)
//! - JSON test-record ingest (`records`)
//! - predictions CSV export (`export`)

pub mod export;
pub mod locate;
pub mod records;

pub use export::*;
pub use locate::*;
pub use records::*;
