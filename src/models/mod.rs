//! Model artifacts and the prediction pipeline they describe.
//!
//! - artifact deserialization + validation (`artifact`)
//! - imputation / scaling / one-hot encoding (`preprocess`)
//! - classifiers (`classifier`)
//! - the `Predictor` seam and the pipeline implementing it (`pipeline`)

pub mod artifact;
pub mod classifier;
pub mod pipeline;
pub mod preprocess;

pub use artifact::{ArtifactMetadata, LoadedModel, ModelArtifact, load_model};
pub use pipeline::{Pipeline, Predictor};
