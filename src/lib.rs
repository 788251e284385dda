//! `cars-predict` library crate.
//!
//! The binary (`predict`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - callers can run `app::pipeline::run_predict` and handle failures themselves

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
