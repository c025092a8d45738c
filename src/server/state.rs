// ============================================================
// Layer 1 — Service State
// ============================================================
// Built once at startup and shared read-only with every handler
// through Arc<AppState>. Nothing here changes after construction:
// there is no reload or retrain endpoint.
//
//   artifact present   → Loaded(Inferencer)
//   artifact missing   → Unloaded (warning logged, server still starts)
//   artifact corrupt   → startup error
//
// The metrics record is read at the same time; a missing or
// unreadable metrics file leaves it as None.

use crate::config::AppConfig;
use crate::domain::prediction::Prediction;
use crate::error::{ClassifierError, Result};
use crate::infra::metrics::{self, MetricsRecord};
use crate::ml::inferencer::Inferencer;

pub const MODEL_NOT_LOADED: &str = "Model not loaded. Run: ticket-classifier train";

#[derive(Debug)]
pub enum ModelState {
    Unloaded,
    Loaded(Inferencer),
}

#[derive(Debug)]
pub struct AppState {
    config:  AppConfig,
    model:   ModelState,
    metrics: Option<MetricsRecord>,
}

impl AppState {
    pub fn new(config: AppConfig, model: ModelState, metrics: Option<MetricsRecord>) -> Self {
        Self { config, model, metrics }
    }

    /// Load the artifact and metrics named by `config`.
    pub fn load(config: AppConfig) -> Result<Self> {
        let model = match Inferencer::from_artifact(&config.model_path) {
            Ok(inferencer) => ModelState::Loaded(inferencer),
            Err(e) if e.is_not_found() => {
                tracing::warn!("{e}; serving without a model until `train` is run");
                ModelState::Unloaded
            }
            Err(e) => return Err(e),
        };

        let metrics = match metrics::load_metrics(&config.metrics_path) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable metrics file '{}': {e}",
                    config.metrics_path.display()
                );
                None
            }
        };

        Ok(Self::new(config, model, metrics))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.model, ModelState::Loaded(_))
    }

    pub fn metrics(&self) -> Option<&MetricsRecord> {
        self.metrics.as_ref()
    }

    /// Classify `text`, or fail with ServiceUnavailable while Unloaded.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        match &self.model {
            ModelState::Loaded(inferencer) => inferencer.predict(text),
            ModelState::Unloaded => Err(ClassifierError::ServiceUnavailable(MODEL_NOT_LOADED.into())),
        }
    }
}
