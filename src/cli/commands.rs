// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Five subcommands: generate, train, predict, serve, start.
//
// Every path and the port resolve in the same order:
//   --flag  →  environment variable  →  built-in default
// (clap's `env` feature does the middle step).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::config::{
    AppConfig, DEFAULT_DATA_PATH, DEFAULT_METRICS_PATH, DEFAULT_MODEL_PATH, DEFAULT_PORT,
};
use crate::data::generator::{DEFAULT_N_PER_CLASS, DEFAULT_SEED};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a synthetic labelled ticket corpus as CSV
    Generate(GenerateArgs),

    /// Fit TF-IDF + logistic regression and save the model and metrics
    Train(TrainArgs),

    /// Classify one text with a saved model
    Predict(PredictArgs),

    /// Serve /health, /model-info and /predict over HTTP
    Serve(ServeArgs),

    /// Generate and train whatever is missing, then serve
    Start(StartArgs),
}

// ─── Shared argument groups ───────────────────────────────────────────────────
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// CSV corpus with a `text,label` header
    #[arg(long, env = "DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Binary pipeline artifact
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,

    /// JSON metrics record
    #[arg(long, env = "METRICS_PATH", default_value = DEFAULT_METRICS_PATH)]
    pub metrics_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct PortArgs {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

/// Training hyper-parameters.
#[derive(Args, Debug, Clone)]
pub struct HyperArgs {
    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Seed for the stratified split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Smallest n-gram length
    #[arg(long, default_value_t = 1)]
    pub ngram_min: usize,

    /// Largest n-gram length
    #[arg(long, default_value_t = 2)]
    pub ngram_max: usize,

    /// Drop terms seen in fewer training documents than this
    #[arg(long, default_value_t = 2)]
    pub min_df: usize,

    /// Upper bound on optimiser iterations
    #[arg(long, default_value_t = 2000)]
    pub max_iter: usize,

    /// Adam step size
    #[arg(long, default_value_t = 0.1)]
    pub lr: f64,

    /// Stop once the loss changes by less than this
    #[arg(long, default_value_t = 1e-6)]
    pub tol: f64,

    /// Inverse L2 regularisation strength
    #[arg(long, default_value_t = 1.0)]
    pub c: f64,
}

impl From<HyperArgs> for TrainConfig {
    fn from(a: HyperArgs) -> Self {
        TrainConfig {
            test_fraction: a.test_fraction,
            seed:          a.seed,
            ngram_min:     a.ngram_min,
            ngram_max:     a.ngram_max,
            min_df:        a.min_df,
            max_iter:      a.max_iter,
            learning_rate: a.lr,
            tol:           a.tol,
            c:             a.c,
        }
    }
}

// ─── Per-command arguments ────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Where to write the corpus
    #[arg(long, env = "DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub out: PathBuf,

    /// Rows per label
    #[arg(long, default_value_t = DEFAULT_N_PER_CLASS)]
    pub n_per_class: usize,

    /// Seed for ticket ids and row order
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(flatten)]
    pub hyper: HyperArgs,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// The ticket text to classify
    #[arg(long)]
    pub text: String,

    /// Binary pipeline artifact
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(flatten)]
    pub port: PortArgs,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    #[command(flatten)]
    pub port: PortArgs,

    /// Rows per label if the corpus has to be generated
    #[arg(long, default_value_t = DEFAULT_N_PER_CLASS)]
    pub n_per_class: usize,

    #[command(flatten)]
    pub hyper: HyperArgs,
}

impl ServeArgs {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            model_path:   self.artifacts.model_path.clone(),
            metrics_path: self.artifacts.metrics_path.clone(),
            port:         self.port.port,
            ..AppConfig::default()
        }
    }
}

impl StartArgs {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            data_path:    self.data.data_path.clone(),
            model_path:   self.artifacts.model_path.clone(),
            metrics_path: self.artifacts.metrics_path.clone(),
            port:         self.port.port,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use super::*;
    use clap::Parser;

    #[test]
    fn test_train_defaults_match_train_config() {
        let cli = Cli::try_parse_from(["ticket-classifier", "train"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        assert_eq!(TrainConfig::from(args.hyper), TrainConfig::default());
    }

    #[test]
    fn test_serve_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "ticket-classifier", "serve", "--port", "9000", "--model-path", "/tmp/m.bin",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else { panic!("expected serve") };
        let cfg = args.app_config();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.model_path, PathBuf::from("/tmp/m.bin"));
    }

    #[test]
    fn test_predict_requires_text() {
        assert!(Cli::try_parse_from(["ticket-classifier", "predict"]).is_err());
    }
}
