// ============================================================
// Layer 6 — Metrics Record Store
// ============================================================
// One JSON file per training run, read back by `/model-info`.
//
// Example models/metrics.json:
//   {
//     "accuracy": 1.0,
//     "f1_macro": 1.0,
//     "n_train": 1440,
//     "n_test": 360,
//     "trained_at_utc": "2026-10-19T09:12:44.031Z"
//   }
//
// A missing file is not an error: `load_metrics` returns None and
// the API renders it as an empty object.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::evaluation::Evaluation;

/// Held-out scores and split sizes of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Fraction of test rows classified correctly, in [0, 1]
    pub accuracy: f64,

    /// Unweighted mean F1 over labels, in [0, 1]
    pub f1_macro: f64,

    pub n_train: usize,
    pub n_test:  usize,

    /// When training finished (UTC, RFC 3339)
    pub trained_at_utc: DateTime<Utc>,
}

impl MetricsRecord {
    /// Stamp an evaluation with split sizes and the current time.
    pub fn new(evaluation: Evaluation, n_train: usize, n_test: usize) -> Self {
        Self {
            accuracy: evaluation.accuracy,
            f1_macro: evaluation.f1_macro,
            n_train,
            n_test,
            trained_at_utc: Utc::now(),
        }
    }
}

/// Write `record` as JSON, creating parent directories.
pub fn save_metrics(path: &Path, record: &MetricsRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(record)?)?;
    tracing::debug!("Saved metrics to '{}'", path.display());
    Ok(())
}

/// Read the metrics record; `Ok(None)` when the file does not exist.
pub fn load_metrics(path: &Path) -> Result<Option<MetricsRecord>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}
