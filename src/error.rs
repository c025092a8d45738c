// ============================================================
// Error Types
// ============================================================
// One error enum for the whole library. The CLI layer wraps these
// in anyhow for context; the HTTP layer maps them to status codes.
//
//   NotFound            → a corpus or artifact file is missing
//   InvalidInput        → data that cannot be trained on / predicted
//   ServiceUnavailable  → predict called before a model was loaded
//   CorruptArtifact     → the artifact exists but cannot be used
//   Training            → the numeric backend failed

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for classifier operations.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// A required file does not exist.
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// Input data is unusable (label diversity, empty text, empty vocabulary).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No model is loaded in the serving process.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The persisted artifact is undecodable or inconsistent.
    #[error("corrupt artifact: {0}")]
    CorruptArtifact(String),

    /// The numeric backend failed while fitting.
    #[error("training failed: {0}")]
    Training(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact encoding error: {0}")]
    Bincode(#[from] bincode::Error),
}

impl ClassifierError {
    /// Build a NotFound error for the given kind of file.
    pub fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound { what, path: path.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;
