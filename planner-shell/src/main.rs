//! planner-shell - the event planner's shell bridge
//!
//! This binary speaks the planner shell protocol: one JSON request per line
//! on stdin, one JSON response per line on stdout. Events are kept in a
//! single JSON-array file (`events.json` in the working directory unless
//! configured otherwise). Logs go to stderr.

mod handler;

use anyhow::Result;
use clap::Parser;
use planner_core::bridge::FileBridge;
use planner_core::config::PlannerConfig;
use planner_core::protocol::{BridgeResponse, Request};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "planner-shell")]
#[command(about = "Serve save/load/delete requests for an events file over stdin/stdout")]
struct Cli {
    /// Events file, overriding the configured events_file
    #[arg(long)]
    events_file: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlannerConfig::load_from(path)?,
        None => PlannerConfig::load()?,
    };
    init_tracing(&config.log_level);

    let path = cli.events_file.unwrap_or_else(|| config.events_file_path());
    let bridge = FileBridge::new(path);
    tracing::debug!(path = %bridge.path().display(), "shell ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handler::handle_request(&bridge, request).await,
            Err(e) => {
                tracing::warn!(error = %e, "unparsable request");
                BridgeResponse::failed(format!("Failed to parse request: {}", e)).to_line()
            }
        };

        stdout.write_all(format!("{}\n", response).as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
