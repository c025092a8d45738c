// ============================================================
// Layer 3 — Prediction Result
// ============================================================
// Ephemeral value created once per classified text. Serialises
// to the `/predict` response body as-is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The top predicted class
    pub label: String,

    /// Probability of `label` in [0, 1]; 0.0 when the model
    /// cannot estimate probabilities
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}
