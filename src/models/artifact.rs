//! Model artifact loading.
//!
//! An artifact is a JSON document written by the training pipeline:
//!
//! ```json
//! {
//!   "metadata": { "name": "cars_pipe", "version": 3, "accuracy": 0.71 },
//!   "preprocessor": { "numeric": [...], "categorical": [...] },
//!   "classifier": { "type": "RandomForestClassifier", "classes": [...], "trees": [...] }
//! }
//! ```
//!
//! Loading validates the classifier against the preprocessor so shape errors
//! surface here rather than mid-prediction.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::models::classifier::Classifier;
use crate::models::pipeline::{Pipeline, Predictor};
use crate::models::preprocess::ColumnTransformer;

/// Free-form training metadata; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub name: Option<String>,
    pub author: Option<String>,
    pub version: Option<u32>,
    pub trained_at: Option<String>,
    pub model_type: Option<String>,
    pub accuracy: Option<f64>,
}

/// On-disk schema of a model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub metadata: Option<ArtifactMetadata>,
    pub preprocessor: ColumnTransformer,
    pub classifier: Classifier,
}

/// A ready-to-use model: the predictor plus its classifier's display name.
pub struct LoadedModel {
    pub path: PathBuf,
    pub classifier_name: String,
    pub metadata: Option<ArtifactMetadata>,
    pub predictor: Box<dyn Predictor>,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("path", &self.path)
            .field("classifier_name", &self.classifier_name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Deserialize and validate the artifact at `path`.
pub fn load_model(path: &Path) -> Result<LoadedModel, AppError> {
    let file = File::open(path).map_err(|e| AppError::deserialization(path, e.to_string()))?;
    let artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::deserialization(path, e.to_string()))?;

    let pipeline = Pipeline {
        preprocessor: artifact.preprocessor,
        classifier: artifact.classifier,
    };
    pipeline
        .validate()
        .map_err(|msg| AppError::deserialization(path, format!("incompatible artifact: {msg}")))?;

    if let Some(meta) = &artifact.metadata {
        debug!(
            name = meta.name.as_deref().unwrap_or("-"),
            version = meta.version,
            trained_at = meta.trained_at.as_deref().unwrap_or("-"),
            accuracy = meta.accuracy,
            "Model metadata"
        );
    }

    Ok(LoadedModel {
        path: path.to_path_buf(),
        classifier_name: pipeline.classifier_name().to_string(),
        metadata: artifact.metadata,
        predictor: Box::new(pipeline),
    })
}
