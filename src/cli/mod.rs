pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "workery-server")]
#[command(about = "Workery API server - multi-tenant workforce management backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides WORKERY_PORT/PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Print the effective configuration as JSON")]
    Config,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.api.port = port;
            }
            serve::serve(config).await
        }
        Commands::Config => {
            config.security.jwt_secret = if config.security.jwt_secret.is_empty() {
                String::new()
            } else {
                "<redacted>".to_string()
            };
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
