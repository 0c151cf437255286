use clap::Parser;
use tracing_subscriber::EnvFilter;

use workery_server::cli::{self, Cli};
use workery_server::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,workery_server=debug")),
        )
        .init();

    let cli = Cli::parse();
    cli::run(cli, config::config().clone()).await
}
