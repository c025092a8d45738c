// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers:
//
//   CorpusSource           — anything that yields labelled records
//                            (CsvCorpusLoader, in-memory fixtures)
//   Predict                — anything that maps text to a label
//   PredictWithConfidence  — a Predict that can also estimate
//                            per-class probabilities
//
// Probability support is a property of the concrete model type.
// A model advertises it by overriding `Predict::with_confidence`
// to return itself; the Predictor never probes for it any other way.

use crate::domain::record::CorpusRecord;
use crate::error::Result;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full labelled corpus.
pub trait CorpusSource {
    /// Load every record from this source.
    fn load_all(&self) -> Result<Vec<CorpusRecord>>;
}

// ─── Predict ──────────────────────────────────────────────────────────────────
/// A fitted model that assigns one of its known classes to a text.
pub trait Predict {
    /// The ordered list of classes the model can emit.
    fn classes(&self) -> &[String];

    /// The top predicted class for `text`.
    fn predict_label(&self, text: &str) -> String;

    /// Probability capability, if this model has one.
    fn with_confidence(&self) -> Option<&dyn PredictWithConfidence> {
        None
    }
}

// ─── PredictWithConfidence ────────────────────────────────────────────────────
/// A model that can estimate a probability for every class.
pub trait PredictWithConfidence: Predict {
    /// Per-class probabilities, indexed like `classes()`. Sums to 1.
    fn predict_proba(&self, text: &str) -> Vec<f64>;
}
