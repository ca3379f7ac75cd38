use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hola::config::{env, loader};
use hola::lifecycle::{signals, Shutdown};
use hola::observability::{logging, metrics};
use hola::{HolaConfig, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "hola", about = "Greeting microservice with a resilient chained call")]
struct Cli {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => HolaConfig::default(),
    };
    let config = env::from_env(config);

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        downstream_timeout_ms = config.downstream.timeout_ms,
        tracing_enabled = config.tracing.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::watch(shutdown));

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
