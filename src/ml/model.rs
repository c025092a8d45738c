// ============================================================
// Layer 5 — Logistic Regression Module (Burn)
// ============================================================
// Multinomial logistic regression is a single linear layer
// followed by softmax:
//
//   logits = x · W + b        x: [batch, n_features]
//                             W: [n_features, n_classes]
//   p      = softmax(logits)  p: [batch, n_classes]
//
// Training objective (L2-regularised, C = inverse strength):
//
//   loss = mean_i CE(logits_i, y_i) + ‖W‖² / (2 · C · n)
//
// Weights start at zero so two fits on the same data are
// bit-for-bit identical; the problem is convex, so the
// starting point does not change where it converges.

use burn::{
    nn::{loss::CrossEntropyLossConfig, Initializer, Linear, LinearConfig},
    prelude::*,
};

use crate::error::ClassifierError;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
#[derive(Config, Debug)]
pub struct LogisticRegressionConfig {
    pub n_features: usize,
    pub n_classes:  usize,
}

impl LogisticRegressionConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LogisticRegression<B> {
        let linear = LinearConfig::new(self.n_features, self.n_classes)
            .with_initializer(Initializer::Zeros)
            .init(device);
        LogisticRegression { linear }
    }
}

#[derive(Module, Debug)]
pub struct LogisticRegression<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> LogisticRegression<B> {
    /// x: [batch, n_features] → logits: [batch, n_classes]
    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(x)
    }

    /// Mean cross-entropy plus `l2 · ‖W‖²`. Bias is not penalised.
    pub fn forward_loss(
        &self,
        x:       Tensor<B, 2>,
        targets: Tensor<B, 1, Int>,
        l2:      f64,
    ) -> Tensor<B, 1> {
        let logits = self.forward(x);
        let ce = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits, targets);
        let penalty = self.linear.weight.val().powf_scalar(2.0).sum().mul_scalar(l2);
        ce + penalty
    }

    /// Copy the fitted parameters out of the backend.
    ///
    /// Returns `(weights, bias)` with `weights` row-major
    /// `[n_features][n_classes]` and `bias` of length `n_classes`.
    pub fn into_parameters(self) -> crate::error::Result<(Vec<f32>, Vec<f32>)> {
        let [_, n_classes] = self.linear.weight.val().dims();

        let weights = self
            .linear
            .weight
            .val()
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ClassifierError::Training(format!("cannot read weights: {e:?}")))?;

        let bias = match self.linear.bias {
            Some(bias) => bias
                .val()
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| ClassifierError::Training(format!("cannot read bias: {e:?}")))?,
            None => vec![0.0; n_classes],
        };

        Ok((weights, bias))
    }
}
