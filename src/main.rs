use std::path::PathBuf;

use clap::Parser;
use setupwizard_lib::bootstrap::{resolve_config, run_setup, tracing::init_tracing_subscriber};
use tokio::io::BufReader;

/// First-run setup wizard (headless driver)
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref())?;

    if let Err(err) = init_tracing_subscriber(&config.log_dir) {
        eprintln!("Failed to initialize tracing: {err}");
    }
    tracing::info!(owner = config.is_owner, "setup wizard starting");

    run_setup(&config, BufReader::new(tokio::io::stdin())).await
}
