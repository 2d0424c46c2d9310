// src/main.rs

use clap::Parser;
use remote_config_sync::cli::{Cli, Command};
use remote_config_sync::{ConfigError, FileStore, RemoteConfig, ResolvedConfig};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ConfigError> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = Arc::new(FileStore::open(&cli.store).await?);
    let config = RemoteConfig::new(store).await?;

    match cli.command {
        Command::Fetch => {
            match config.refresh().await {
                Ok(resolved) => print_resolved(&resolved),
                Err(e) => {
                    warn!(error = %e, "Fetch failed, showing last known values");
                    print_resolved(&config.resolved().await);
                }
            }
            if let Some(snapshot) = config.last_fetch().await {
                println!("fetched_at:         {}", snapshot.fetched_at.to_rfc3339());
                match serde_json::to_string_pretty(&snapshot.document) {
                    Ok(raw) => println!("raw document:\n{raw}"),
                    Err(e) => warn!(error = %e, "Failed to render raw document"),
                }
            } else {
                println!("no successful fetch this run");
            }
        }
        Command::Endpoint => {
            println!("effective endpoint: {}", config.resolve_endpoint().await);
            match config.stored_endpoint_override().await {
                Some(stored) => println!("stored override:    {stored}"),
                None => println!("stored override:    (none)"),
            }
        }
        Command::SetEndpoint { url } => {
            if config.set_endpoint_override(Some(&url)).await {
                println!("override applied: {}", config.resolve_endpoint().await);
            } else {
                eprintln!("override rejected: {url:?} is not an absolute URL");
                std::process::exit(1);
            }
        }
        Command::ClearEndpoint => {
            config.set_endpoint_override(None).await;
            println!("override cleared, default endpoint restored");
            println!("effective endpoint: {}", config.resolve_endpoint().await);
        }
    }

    Ok(())
}

fn print_resolved(resolved: &ResolvedConfig) {
    println!("home_url:           {}", resolved.home_url);
    println!("user_agent:         {}", resolved.user_agent);
    println!("show_share_options: {}", resolved.show_share_options);
    println!("external_app_url:   {}", resolved.external_app_url);
}
