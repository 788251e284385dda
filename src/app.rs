//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the log subscriber
//! - runs the prediction pipeline
//! - reports a failure once before handing it back

use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `predict` binary. Returns the written CSV path.
pub fn run() -> Result<PathBuf, AppError> {
    // `.env` must be loaded before clap reads `PROJECT_PATH`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.run_config();
    let now = chrono::Local::now().naive_local();

    match pipeline::run_predict(&config, now) {
        Ok(out) => Ok(out.output_path),
        Err(err) => {
            error!("Error during prediction: {err}");
            Err(err)
        }
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .try_init();
}
