// ============================================================
// Layer 2 — Bootstrap (the `start` command)
// ============================================================
// Brings a fresh checkout to a servable state:
//
//   corpus missing             → generate it
//   artifact or metrics missing → train
//
// Existing files are never overwritten, so repeated starts reuse
// the first run's corpus and model. Serving is left to the caller.

use crate::application::train_use_case::{TrainConfig, TrainUseCase};
use crate::config::AppConfig;
use crate::data::generator;
use crate::error::Result;

/// What `prepare` had to do before the server could start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub generated: bool,
    pub trained:   bool,
}

pub struct BootstrapUseCase {
    config:      AppConfig,
    train:       TrainConfig,
    n_per_class: usize,
}

impl BootstrapUseCase {
    pub fn new(config: AppConfig, train: TrainConfig, n_per_class: usize) -> Self {
        Self { config, train, n_per_class }
    }

    pub fn prepare(&self) -> Result<BootstrapReport> {
        let cfg = &self.config;
        let mut report = BootstrapReport::default();

        if !cfg.data_path.exists() {
            tracing::info!("No corpus at '{}', generating one", cfg.data_path.display());
            generator::write_corpus(&cfg.data_path, self.n_per_class, generator::DEFAULT_SEED)?;
            report.generated = true;
        }

        if !cfg.model_path.exists() || !cfg.metrics_path.exists() {
            tracing::info!("Model or metrics missing, training");
            TrainUseCase::new(self.train.clone()).train_and_save(
                &cfg.data_path,
                &cfg.model_path,
                &cfg.metrics_path,
            )?;
            report.trained = true;
        }

        Ok(report)
    }
}
