//! Command-line parsing for the batch predictor.
//!
//! Every option has a default, so a bare `predict` runs against
//! `$PROJECT_PATH` (or the current directory) with the standard file layout.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_MODEL_PATTERN, DEFAULT_TEST_PATTERN, RunConfig};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "predict",
    version,
    about = "Score JSON car listings with the newest trained price-category model"
)]
pub struct Cli {
    /// Project base directory containing `data/models`, `data/test` and `data/predictions`.
    #[arg(long, env = "PROJECT_PATH", default_value = ".")]
    pub project_path: PathBuf,

    /// Filename pattern for model artifacts inside `data/models`.
    #[arg(long, default_value = DEFAULT_MODEL_PATTERN)]
    pub model_pattern: String,

    /// Filename pattern for test records inside `data/test`.
    #[arg(long, default_value = DEFAULT_TEST_PATTERN)]
    pub test_pattern: String,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            project_path: self.project_path.clone(),
            model_pattern: self.model_pattern.clone(),
            test_pattern: self.test_pattern.clone(),
        }
    }
}
