// ============================================================
// Layer 5 — Logistic Regression Fitting Loop
// ============================================================
// Full-batch gradient descent with Burn's Adam optimiser on the
// NdArray CPU backend. The corpus is small (hundreds to a few
// thousand rows), so the whole TF-IDF matrix goes into a single
// dense tensor and every iteration sees every row.
//
// Loop:
//   loss  = model.forward_loss(X, y, l2)
//   grads = loss.backward()
//   model = adam.step(lr, model, grads)
//
// Stops after `max_iter` iterations, or earlier once the loss
// moves by less than `tol` between two iterations.
//
// Reference: Burn Book §5 (Training), Kingma & Ba (2015) Adam

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::TensorData,
};

use crate::application::train_use_case::TrainConfig;
use crate::error::{ClassifierError, Result};
use crate::ml::model::{LogisticRegression, LogisticRegressionConfig};
use crate::ml::pipeline::LogisticHead;
use crate::ml::vectorizer::SparseVector;

type TrainBackend = Autodiff<NdArray>;

/// Summary of one fit, logged by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub iterations: usize,
    pub final_loss: f64,
    pub converged:  bool,
}

/// Fit a softmax classifier on sparse features.
///
/// `targets[i]` is the index into `classes` of row `i`.
pub fn fit_logistic(
    features:   &[SparseVector],
    n_features: usize,
    targets:    &[usize],
    classes:    Vec<String>,
    cfg:        &TrainConfig,
) -> Result<(LogisticHead, FitReport)> {
    let n_rows    = features.len();
    let n_classes = classes.len();

    if n_rows == 0 || n_rows != targets.len() {
        return Err(ClassifierError::InvalidInput(format!(
            "cannot fit on {n_rows} feature rows and {} targets",
            targets.len()
        )));
    }
    if cfg.max_iter == 0 {
        return Err(ClassifierError::InvalidInput("max_iter must be at least 1".into()));
    }
    if !(cfg.c > 0.0) {
        return Err(ClassifierError::InvalidInput(format!(
            "regularisation C must be positive, got {}",
            cfg.c
        )));
    }

    let device = NdArrayDevice::default();

    // ── Dense design matrix [n_rows, n_features] ──────────────────────────────
    let mut dense = vec![0.0f32; n_rows * n_features];
    for (row, x) in features.iter().enumerate() {
        for &(col, value) in x {
            dense[row * n_features + col] = value;
        }
    }
    let x = Tensor::<TrainBackend, 2>::from_data(
        TensorData::new(dense, [n_rows, n_features]),
        &device,
    );

    let labels: Vec<i64> = targets.iter().map(|&t| t as i64).collect();
    let y = Tensor::<TrainBackend, 1, Int>::from_data(TensorData::new(labels, [n_rows]), &device);

    // ── Model + optimiser ─────────────────────────────────────────────────────
    let mut model: LogisticRegression<TrainBackend> =
        LogisticRegressionConfig::new(n_features, n_classes).init(&device);
    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let l2 = 1.0 / (2.0 * cfg.c * n_rows as f64);

    let mut prev_loss  = f64::INFINITY;
    let mut final_loss = f64::INFINITY;
    let mut iterations = 0usize;
    let mut converged  = false;

    for iter in 1..=cfg.max_iter {
        let loss = model.forward_loss(x.clone(), y.clone(), l2);
        let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

        if !loss_val.is_finite() {
            return Err(ClassifierError::Training(format!(
                "loss diverged to {loss_val} at iteration {iter}"
            )));
        }

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &model);
        model = optim.step(cfg.learning_rate, model, grads);

        iterations = iter;
        final_loss = loss_val;

        if iter % 100 == 0 {
            tracing::debug!("iter {:>5}/{} | loss={:.6}", iter, cfg.max_iter, loss_val);
        }
        if (prev_loss - loss_val).abs() < cfg.tol {
            converged = true;
            break;
        }
        prev_loss = loss_val;
    }

    if converged {
        tracing::info!("Converged after {} iterations (loss={:.6})", iterations, final_loss);
    } else {
        tracing::warn!(
            "Stopped at max_iter={} without reaching tol={} (loss={:.6})",
            cfg.max_iter,
            cfg.tol,
            final_loss
        );
    }

    let (weights, bias) = model.into_parameters()?;
    let head = LogisticHead::new(classes, n_features, weights, bias)?;

    Ok((head, FitReport { iterations, final_loss, converged }))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Vec<SparseVector>, Vec<usize>) {
        // feature 0 → class 0, feature 1 → class 1
        let features = vec![
            vec![(0, 1.0)],
            vec![(0, 0.9), (1, 0.1)],
            vec![(1, 1.0)],
            vec![(0, 0.1), (1, 0.9)],
        ];
        (features, vec![0, 0, 1, 1])
    }

    fn classes() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_fits_separable_data() {
        let (features, targets) = separable();
        let cfg = TrainConfig { max_iter: 300, ..TrainConfig::default() };
        let (head, report) = fit_logistic(&features, 2, &targets, classes(), &cfg).unwrap();

        assert!(report.iterations <= 300);
        assert!(report.final_loss.is_finite());
        for (x, &t) in features.iter().zip(&targets) {
            assert_eq!(head.predict_index(x), t);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (features, targets) = separable();
        let cfg = TrainConfig { max_iter: 50, ..TrainConfig::default() };
        let (a, _) = fit_logistic(&features, 2, &targets, classes(), &cfg).unwrap();
        let (b, _) = fit_logistic(&features, 2, &targets, classes(), &cfg).unwrap();
        assert_eq!(a.decision_function(&features[1]), b.decision_function(&features[1]));
    }

    #[test]
    fn test_mismatched_targets_rejected() {
        let (features, _) = separable();
        let err = fit_logistic(&features, 2, &[0, 1], classes(), &TrainConfig::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidInput(_)));
    }
}
