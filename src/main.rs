use clap::Parser;
use tracing_subscriber::EnvFilter;
use user_records_api::cli::{self, Cli};
use user_records_api::config::AppConfig;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DB_*, AUTH_USER, AUTH_PASS, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    tracing::info!("Starting User Records API in {:?} mode", config.environment);

    if let Err(e) = cli::run(cli, config).await {
        match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
            _ => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
