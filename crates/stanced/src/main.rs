//! stanced - Stance relay daemon
//!
//! Serves `POST /api/analyze` and `POST /create-checkout-session`.
//! Credentials come from the environment (or a `.env` file).

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;
use stance_core::{init_tracing, LogFormat};
use stanced::{cors_layer, router, AppState, Config};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "stanced")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Stance relay daemon", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, env = "STANCE_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so clap's env fallbacks see it.
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let format = if args.json {
        LogFormat::Json
    } else {
        LogFormat::from_env()
    };
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(format, level);

    let config = Config::from_env().context("invalid configuration")?;
    config.log_credentials();

    let cors = cors_layer(&config.server.allowed_origin).context("invalid CORS origin")?;
    let state = AppState::from_config(&config).context("failed to build provider clients")?;
    let app = router(state, cors);

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(address = %addr, "stanced listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("stanced stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
}
