use anyhow::Result;
use clap::Parser;
use ticket_classifier::cli::{log_filter, Cli};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(tracing_subscriber::EnvFilter::from_default_env())?)
        .init();

    let cli = Cli::parse();
    cli.run()
}
