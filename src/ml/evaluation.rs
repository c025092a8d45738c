// ============================================================
// Layer 5 — Held-out Evaluation
// ============================================================
// Scores predictions on the test partition:
//
//   accuracy = correct / total
//
//   per label L:
//     precision = TP / (TP + FP)     (0 when nothing predicted as L)
//     recall    = TP / (TP + FN)     (0 when L never occurs)
//     F1        = 2·P·R / (P + R)    (0 when P + R = 0)
//
//   f1_macro = unweighted mean of F1 over every label that appears
//              in either the true or the predicted labels
//
// Both scores are in [0, 1]. An empty input scores 0.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub f1_macro: f64,
}

/// Compare true and predicted labels pairwise.
pub fn evaluate<S: AsRef<str>>(y_true: &[S], y_pred: &[S]) -> Evaluation {
    Evaluation {
        accuracy: accuracy(y_true, y_pred),
        f1_macro: f1_macro(y_true, y_pred),
    }
}

pub fn accuracy<S: AsRef<str>>(y_true: &[S], y_pred: &[S]) -> f64 {
    let total = y_true.len().min(y_pred.len());
    if total == 0 {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| as_str(*t) == as_str(*p))
        .count();
    correct as f64 / total as f64
}

pub fn f1_macro<S: AsRef<str>>(y_true: &[S], y_pred: &[S]) -> f64 {
    let labels: BTreeSet<&str> = y_true
        .iter()
        .chain(y_pred)
        .map(as_str)
        .collect();
    if labels.is_empty() {
        return 0.0;
    }

    let sum: f64 = labels
        .iter()
        .map(|label| f1_for(label, y_true, y_pred))
        .sum();
    sum / labels.len() as f64
}

fn f1_for<S: AsRef<str>>(label: &str, y_true: &[S], y_pred: &[S]) -> f64 {
    let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
    for (t, p) in y_true.iter().zip(y_pred) {
        match (as_str(t) == label, as_str(p) == label) {
            (true, true)  => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    let precision = if tp + fp > 0 { tp as f64 / (tp + fp) as f64 } else { 0.0 };
    let recall    = if tp + fn_ > 0 { tp as f64 / (tp + fn_) as f64 } else { 0.0 };
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn as_str<S: AsRef<str>>(s: &S) -> &str {
    s.as_ref()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let y = ["a", "b", "c", "a"];
        let e = evaluate(&y, &y);
        assert_eq!(e.accuracy, 1.0);
        assert_eq!(e.f1_macro, 1.0);
    }

    #[test]
    fn test_partial_predictions() {
        let t = ["a", "a", "b", "b"];
        let p = ["a", "b", "b", "b"];
        let e = evaluate(&t, &p);
        assert_eq!(e.accuracy, 0.75);
        // a: P=1, R=0.5 → 2/3; b: P=2/3, R=1 → 0.8
        let expected = (2.0 / 3.0 + 0.8) / 2.0;
        assert!((e.f1_macro - expected).abs() < 1e-12);
    }

    #[test]
    fn test_label_only_in_predictions_counts_as_zero() {
        let t = ["a", "a"];
        let p = ["a", "z"];
        // a: P=1, R=0.5 → 2/3; z: 0
        assert!((f1_macro(&t, &p) - (2.0 / 3.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let empty: [&str; 0] = [];
        let e = evaluate(&empty, &empty);
        assert_eq!(e.accuracy, 0.0);
        assert_eq!(e.f1_macro, 0.0);
    }
}
