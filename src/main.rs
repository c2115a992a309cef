//! Mocksmith - CLI entry point

use anyhow::Result;
use clap::Parser;
use mocksmith::{EngineConfig, MemoryStore, MockStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "mocksmith",
    about = "Standalone mock HTTP server - dynamic endpoint registration and synthetic responses",
    version
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "mocksmith.yaml")]
    config: PathBuf,

    /// Listen address (overrides the configuration file)
    #[arg(short, long, value_name = "ADDR")]
    listen: Option<SocketAddr>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "info")]
    log_level: Level,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Print default config if requested
    if args.print_config {
        println!("{}", serde_yaml::to_string(&EngineConfig::default())?);
        return Ok(());
    }

    // Load configuration
    let mut config = if args.config.exists() {
        info!(path = ?args.config, "Loading configuration");
        EngineConfig::from_file(&args.config)?
    } else if args.validate {
        anyhow::bail!("Configuration file not found: {:?}", args.config);
    } else {
        info!("Using default configuration (no seed definitions)");
        EngineConfig::default()
    };

    // Validate and exit if requested
    if args.validate {
        config.validate()?;
        println!(
            "Configuration is valid ({} seed endpoints, {} seed schemas)",
            config.seed.endpoints.len(),
            config.seed.schemas.len()
        );
        return Ok(());
    }

    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    // Set up the registry and preload seed definitions
    let store: Arc<dyn MockStore> = Arc::new(MemoryStore::new());
    mocksmith::seed_store(store.as_ref(), &config).await;

    let app = mocksmith::app(store, &config);

    info!(
        listen = %config.listen,
        management_prefix = %config.management_prefix,
        "Starting mocksmith"
    );
    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
