use std::path::PathBuf;

use thiserror::Error;

/// Every way a prediction run can fail.
///
/// Each variant carries its own process exit code so the binary can report
/// the failure class without inspecting messages.
#[derive(Debug, Error)]
pub enum AppError {
    /// No file in `dir` matched the expected pattern.
    #[error("No {what} found in {}", dir.display())]
    NotFound { what: &'static str, dir: PathBuf },

    /// The model artifact could not be read or does not describe a usable pipeline.
    #[error("Failed to load model '{}': {message}", path.display())]
    Deserialization { path: PathBuf, message: String },

    /// A test record file is not a valid JSON object.
    #[error("Invalid JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The model could not produce labels for the assembled table.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    /// A configured file pattern is not a valid glob.
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn deserialization(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Deserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::Prediction(message.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 3,
            Self::Deserialization { .. } => 4,
            Self::Prediction(_) => 5,
            Self::Io { .. } => 6,
            Self::Parse { .. } => 7,
            Self::Pattern { .. } => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_directory() {
        let err = AppError::NotFound {
            what: "trained models",
            dir: PathBuf::from("data/models"),
        };
        assert_eq!(err.to_string(), "No trained models found in data/models");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_codes_are_distinct() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let codes = [
            AppError::Parse {
                path: PathBuf::from("a.json"),
                source: parse_err,
            }
            .exit_code(),
            AppError::NotFound {
                what: "x",
                dir: PathBuf::new(),
            }
            .exit_code(),
            AppError::deserialization("m.pkl", "bad").exit_code(),
            AppError::prediction("bad").exit_code(),
            AppError::io("write", std::io::Error::other("disk full")).exit_code(),
            AppError::Pattern {
                pattern: "[".to_string(),
                source: glob::Pattern::new("[").unwrap_err(),
            }
            .exit_code(),
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
        // 0 is success, 1 is a panic and 2 is a clap usage error.
        assert!(codes.iter().all(|&c| c > 2));
    }
}
