//! Keyword Relay service binary.
//!
//! Startup order: config → logging → metrics → keyword store (first load)
//! → HTTP listener. Fail fast: any startup error is fatal.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use keyword_relay::config::loader::load_config;
use keyword_relay::config::RelayConfig;
use keyword_relay::observability::{logging, metrics};
use keyword_relay::{HttpServer, KeywordSource, KeywordStore};

#[derive(Parser)]
#[command(name = "keyword-relay")]
#[command(about = "Keyword-watching relay with a hot-reloadable keyword list", long_about = None)]
struct Args {
    /// Path to the TOML config file.
    #[arg(short, long, default_value = "relay.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        // No config file: run with defaults against a local keyword file.
        let mut config = RelayConfig::default();
        config.keywords.file = Some("keywords.txt".to_string());
        config
    };

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        config = %args.config.display(),
        bind_address = %config.listener.bind_address,
        refresh_interval_secs = config.keywords.refresh_interval().as_secs(),
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

    let source = KeywordSource::from_config(&config.keywords)
        .ok_or("no keyword source configured; set keywords.file or keywords.url")?;
    tracing::info!(source = %source.describe(), "Keyword source configured");

    let store = Arc::new(
        KeywordStore::init(
            source,
            &config.keywords.defaults,
            config.keywords.refresh_interval(),
        )
        .await,
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, store);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
