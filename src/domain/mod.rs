//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the run configuration (`RunConfig`) and its default file patterns
//! - test records (`Record`)
//! - output rows (`PredictionRow`)

pub mod types;

pub use types::*;
