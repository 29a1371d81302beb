pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "user-records-api")]
#[command(about = "User records REST API over PostgreSQL")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Listening port, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Connect to the database, ping it, and exit")]
    Check,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Check => commands::check::handle(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["user-records-api"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_port_override() {
        let cli = Cli::parse_from(["user-records-api", "serve", "--port", "8080"]);
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(8080) })));
    }

    #[test]
    fn parses_check() {
        let cli = Cli::parse_from(["user-records-api", "check"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
