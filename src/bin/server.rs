use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::io::Write;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use pinrelay::config::load_and_validate_config;
use pinrelay::logging::{self, LogFormat, LogLevel};
use pinrelay::server::{build_router, AppState};
use pinrelay::{GIT_COMMIT, USER_AGENT};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The address to listen on
    #[arg(long, env = "PINRELAY_LISTEN_ADDRESS", default_value = "0.0.0.0:8080")]
    listen_address: String,

    /// Path to the TOML configuration file (defaults apply when omitted)
    #[arg(short = 'c', long, env = "PINRELAY_CONFIG")]
    config: Option<String>,

    /// Set the log level
    #[arg(short, long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() {
    // Config comes from .env, the environment and the command line
    dotenv().ok();
    let args = Args::parse();
    logging::init(args.log_level.clone(), args.log_format.clone());

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    info!(
        "Starting {} (commit {}) with options: {:?}",
        USER_AGENT, GIT_COMMIT, args
    );

    let config = load_and_validate_config(args.config.as_deref())?;
    let state = AppState::from_config(&config.ipfs_upload_provider);
    info!("IPFS uploads enabled: {}", state.uploader.is_ready());

    let app = build_router(state, &config.server)?;

    let shutdown_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received shutdown signal, shutting down server...");
        let _ = std::io::stdout().flush();
    };

    let addr: SocketAddr = args
        .listen_address
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", args.listen_address))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;
    Ok(())
}
