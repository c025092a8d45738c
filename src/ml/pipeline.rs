// ============================================================
// Layer 5 — Fitted Pipeline (the Trained Artifact)
// ============================================================
// TicketPipeline = TfidfVectorizer + LogisticHead + class list.
// It is what `train` persists and what the server loads.
//
// The head holds plain Vec<f32> parameters copied out of Burn
// after fitting, so inference needs no tensor backend:
//
//   scores[c] = bias[c] + Σ_f x[f] · weights[f * n_classes + c]
//   proba     = softmax(scores)
//
// Only sparse (non-zero) features are visited, which keeps a
// single prediction at O(nnz · n_classes).

use serde::{Deserialize, Serialize};

use crate::domain::traits::{Predict, PredictWithConfidence};
use crate::error::{ClassifierError, Result};
use crate::ml::vectorizer::{SparseVector, TfidfVectorizer};

/// Linear softmax classifier over a fixed, sorted class list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticHead {
    classes:    Vec<String>,
    n_features: usize,
    /// Row-major [n_features][n_classes]
    weights:    Vec<f32>,
    bias:       Vec<f32>,
}

impl LogisticHead {
    pub fn new(
        classes:    Vec<String>,
        n_features: usize,
        weights:    Vec<f32>,
        bias:       Vec<f32>,
    ) -> Result<Self> {
        let head = Self { classes, n_features, weights, bias };
        head.validate()?;
        Ok(head)
    }

    /// Check that parameter shapes agree with the class list.
    pub fn validate(&self) -> Result<()> {
        let k = self.classes.len();
        if k < 2 {
            return Err(ClassifierError::CorruptArtifact(format!(
                "classifier needs at least 2 classes, has {k}"
            )));
        }
        if self.weights.len() != self.n_features * k || self.bias.len() != k {
            return Err(ClassifierError::CorruptArtifact(format!(
                "parameter shape mismatch: {} weights, {} biases for {} features × {} classes",
                self.weights.len(),
                self.bias.len(),
                self.n_features,
                k
            )));
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Raw per-class scores (logits) for one sparse vector.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        let k = self.classes.len();
        let mut scores: Vec<f64> = self.bias.iter().map(|&b| b as f64).collect();
        for &(f, value) in x {
            if f >= self.n_features {
                continue;
            }
            let row = &self.weights[f * k..(f + 1) * k];
            for (score, &w) in scores.iter_mut().zip(row) {
                *score += (value * w) as f64;
            }
        }
        scores
    }

    /// Softmax over `decision_function`.
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        softmax(&self.decision_function(x))
    }

    /// Index of the highest score; ties resolve to the earlier class.
    pub fn predict_index(&self, x: &SparseVector) -> usize {
        argmax(&self.decision_function(x))
    }
}

/// The full fitted text → label pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketPipeline {
    vectorizer: TfidfVectorizer,
    head:       LogisticHead,
}

impl TicketPipeline {
    pub fn new(vectorizer: TfidfVectorizer, head: LogisticHead) -> Result<Self> {
        let pipeline = Self { vectorizer, head };
        pipeline.validate()?;
        Ok(pipeline)
    }

    /// Shape checks run after construction and after deserialisation.
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.head.validate()?;
        if self.vectorizer.n_features() != self.head.n_features() {
            return Err(ClassifierError::CorruptArtifact(format!(
                "vectorizer has {} features but classifier expects {}",
                self.vectorizer.n_features(),
                self.head.n_features()
            )));
        }
        Ok(())
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn head(&self) -> &LogisticHead {
        &self.head
    }
}

impl Predict for TicketPipeline {
    fn classes(&self) -> &[String] {
        self.head.classes()
    }

    fn predict_label(&self, text: &str) -> String {
        let x = self.vectorizer.transform(text);
        self.head.classes()[self.head.predict_index(&x)].clone()
    }

    fn with_confidence(&self) -> Option<&dyn PredictWithConfidence> {
        Some(self)
    }
}

impl PredictWithConfidence for TicketPipeline {
    fn predict_proba(&self, text: &str) -> Vec<f64> {
        let x = self.vectorizer.transform(text);
        self.head.predict_proba(&x)
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn argmax(scores: &[f64]) -> usize {
    let mut best = 0usize;
    for (i, s) in scores.iter().enumerate() {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}
