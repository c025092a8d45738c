// ============================================================
// Application Configuration
// ============================================================
// Paths and port for one process, populated once at startup
// (CLI flag → environment variable → default) and then passed
// by value into the use cases and the HTTP server.
//
//   DATA_PATH     data/raw/tickets.csv
//   MODEL_PATH    models/ticket_model.bin
//   METRICS_PATH  models/metrics.json
//   PORT          8001

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_PATH: &str = "data/raw/tickets.csv";
pub const DEFAULT_MODEL_PATH: &str = "models/ticket_model.bin";
pub const DEFAULT_METRICS_PATH: &str = "models/metrics.json";
pub const DEFAULT_PORT: u16 = 8001;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV corpus with a `text,label` header
    pub data_path: PathBuf,
    /// Binary pipeline artifact written by `train`
    pub model_path: PathBuf,
    /// JSON metrics record written by `train`
    pub metrics_path: PathBuf,
    /// HTTP listen port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            metrics_path: PathBuf::from(DEFAULT_METRICS_PATH),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Same defaults, with the artifact and metrics paths replaced.
    pub fn with_artifacts(model_path: impl Into<PathBuf>, metrics_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            metrics_path: metrics_path.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_conventional_dirs() {
        let cfg = AppConfig::default();
        assert!(cfg.data_path.starts_with("data"));
        assert!(cfg.model_path.starts_with("models"));
        assert!(cfg.metrics_path.starts_with("models"));
        assert_eq!(cfg.port, 8001);
    }

    #[test]
    fn with_artifacts_keeps_other_defaults() {
        let cfg = AppConfig::with_artifacts("/tmp/m.bin", "/tmp/m.json");
        assert_eq!(cfg.model_path, PathBuf::from("/tmp/m.bin"));
        assert_eq!(cfg.metrics_path, PathBuf::from("/tmp/m.json"));
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_PATH));
    }
}
