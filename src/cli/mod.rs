// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to
// Layer 2 (or to the HTTP server). The CLI only routes and
// prints; it never computes.
//
//   generate → data::generator::write_corpus
//   train    → TrainUseCase
//   predict  → Inferencer
//   serve    → server::serve
//   start    → BootstrapUseCase, then server::serve
//
// Library errors are wrapped with anyhow context here.

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use commands::{Commands, GenerateArgs, PredictArgs, ServeArgs, StartArgs, TrainArgs};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "ticket-classifier",
    version,
    about = "Train a support-ticket classifier and serve its predictions over HTTP."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Generate(args) => run_generate(args),
            Commands::Train(args)    => run_train(args),
            Commands::Predict(args)  => run_predict(args),
            Commands::Serve(args)    => run_serve(args),
            Commands::Start(args)    => run_start(args),
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    use crate::data::generator;

    let rows = generator::write_corpus(&args.out, args.n_per_class, args.seed)
        .with_context(|| format!("cannot write corpus to '{}'", args.out.display()))?;
    println!("Wrote {} rows to {}", rows, args.out.display());
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let data_path = args.data.data_path;
    let model_path = args.artifacts.model_path;
    let metrics_path = args.artifacts.metrics_path;

    let metrics = match TrainUseCase::new(args.hyper.into()).train_and_save(
        &data_path,
        &model_path,
        &metrics_path,
    ) {
        Ok(metrics) => metrics,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("{e}. Run: ticket-classifier generate");
        }
        Err(e) => return Err(e).context("training failed"),
    };

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    println!("Model saved to {}", model_path.display());
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::ml::inferencer::Inferencer;

    let inferencer = match Inferencer::from_artifact(&args.model_path) {
        Ok(inferencer) => inferencer,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("{e}. Run: ticket-classifier train");
        }
        Err(e) => return Err(e).context("cannot load model"),
    };

    let prediction = inferencer.predict(&args.text)?;
    println!("{}", serde_json::to_string(&prediction)?);
    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<()> {
    block_on_server(args.app_config())
}

fn run_start(args: StartArgs) -> Result<()> {
    use crate::application::bootstrap::BootstrapUseCase;

    let config = args.app_config();
    let report = BootstrapUseCase::new(config.clone(), args.hyper.into(), args.n_per_class)
        .prepare()
        .context("cannot prepare corpus and model")?;
    tracing::info!(
        "Bootstrap done (generated corpus: {}, trained model: {})",
        report.generated,
        report.trained
    );

    block_on_server(config)
}

/// `base` (usually RUST_LOG) plus this crate's and the HTTP request
/// tracing at INFO.
pub fn log_filter(base: EnvFilter) -> Result<EnvFilter> {
    Ok(base
        .add_directive("ticket_classifier=info".parse()?)
        .add_directive("tower_http=info".parse()?))
}

/// The server is the only async part, so the runtime is built here.
fn block_on_server(config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("cannot start the async runtime")?;
    runtime
        .block_on(crate::server::serve(config))
        .context("server failed")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_enables_crate_and_request_tracing() {
        let filter = log_filter(EnvFilter::new("")).unwrap().to_string();
        assert!(filter.contains("ticket_classifier=info"));
        assert!(filter.contains("tower_http=info"));
    }
}
