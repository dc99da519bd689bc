//! Coherent server binary
//!
//! Starts the HTTP server. Secrets come from the environment:
//! `GOOGLE_SEARCH_API_KEY`, `GOOGLE_SEARCH_ENGINE_ID` and `OPENAI_API_KEY`.

use anyhow::Context;
use clap::Parser;
use coherent_server::{config::CoherentConfig, init_tracing, start_server};
use std::path::PathBuf;
use tracing::warn;

/// Answer questions from web evidence
#[derive(Debug, Parser)]
#[command(name = "coherent-server", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "COHERENT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CoherentConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("No config file specified, using defaults");
            CoherentConfig::default()
        }
    };

    if let Some(port) = args.port {
        config.server.bind_port = port;
    }

    start_server(config).await?;
    Ok(())
}
