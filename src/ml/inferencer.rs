// ============================================================
// Layer 5 — Inferencer (Predictor)
// ============================================================
// Turns a loaded model and one text into a Prediction.
//
//   label      = model.predict_label(text)
//   confidence = proba[classes.index(label)]  if the model has
//                                             the probability
//                                             capability
//              = 0.0                          otherwise
//
// The lookup goes through the model's ordered class list rather
// than assuming argmax(proba) and the label share an index.

use std::path::Path;

use crate::domain::prediction::Prediction;
use crate::domain::traits::Predict;
use crate::error::{ClassifierError, Result};
use crate::infra::checkpoint;
use crate::ml::pipeline::TicketPipeline;

/// Classify `text` with any `Predict` implementation.
pub fn predict_one(model: &dyn Predict, text: &str) -> Result<Prediction> {
    let label = model.predict_label(text);

    let Some(probabilistic) = model.with_confidence() else {
        return Ok(Prediction::new(label, 0.0));
    };

    let idx = model
        .classes()
        .iter()
        .position(|c| *c == label)
        .ok_or_else(|| {
            ClassifierError::CorruptArtifact(format!(
                "predicted label '{label}' is not in the model's class list"
            ))
        })?;

    let proba = probabilistic.predict_proba(text);
    let confidence = proba.get(idx).copied().ok_or_else(|| {
        ClassifierError::CorruptArtifact(format!(
            "probability vector has {} entries, expected at least {}",
            proba.len(),
            idx + 1
        ))
    })?;

    Ok(Prediction::new(label, confidence.clamp(0.0, 1.0)))
}

/// A loaded pipeline ready to answer predictions.
#[derive(Debug, Clone)]
pub struct Inferencer {
    pipeline: TicketPipeline,
}

impl Inferencer {
    pub fn new(pipeline: TicketPipeline) -> Self {
        Self { pipeline }
    }

    /// Load the pipeline artifact from disk.
    /// A missing file surfaces as `ClassifierError::NotFound`.
    pub fn from_artifact(path: &Path) -> Result<Self> {
        let pipeline = checkpoint::load_model(path)?;
        tracing::info!(
            "Model loaded from '{}' ({} classes, {} features)",
            path.display(),
            pipeline.head().classes().len(),
            pipeline.vectorizer().n_features()
        );
        Ok(Self::new(pipeline))
    }

    pub fn predict(&self, text: &str) -> Result<Prediction> {
        predict_one(&self.pipeline, text)
    }

    pub fn classes(&self) -> &[String] {
        self.pipeline.head().classes()
    }
}
