use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gif_explorer::config::Config;
use gif_explorer::constants::{DEFAULT_RELAY_URL, SEARCH_DEBOUNCE_MS};
use gif_explorer::{browse, web};

#[derive(Parser)]
#[command(name = "gif-explorer")]
#[command(about = "Relay and browser for trending and searched GIFs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay and serve the browser page (default)
    Serve,
    /// Browse GIFs from the terminal through a running relay
    Browse {
        /// Relay API base URL
        #[arg(long, env = "RELAY_URL", default_value = DEFAULT_RELAY_URL)]
        relay_url: String,
        /// Quiet period before search input is fetched, in milliseconds
        #[arg(long, default_value_t = SEARCH_DEBOUNCE_MS)]
        debounce_ms: u64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await,
        Commands::Browse {
            relay_url,
            debounce_ms,
        } => browse::run(&relay_url, Duration::from_millis(debounce_ms)).await,
    }
}

async fn serve() -> Result<()> {
    info!("Starting gif-explorer relay");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        upstream = %config.giphy_base_url,
        port = config.web_port,
        "Configuration loaded"
    );
    if !config.has_giphy_key() {
        warn!("GIPHY_KEY is not set; upstream requests will be rejected");
    }

    web::serve(config, shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gif_explorer=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        // Logs go to stderr so the terminal browser's output stays readable.
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down...");
}
