//! Tileforms Web Server Binary
//!
//! This binary starts the tileforms web server that serves projected forms
//! to a browser-side form renderer.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001, mock tile endpoint)
//! tileforms-web
//!
//! # Serve and persist tiles from a file
//! tileforms-web --port 8080 --tiles ~/tiles.json
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tileforms::config::Config;
use tileforms::web;

/// Tileforms Web Server - REST API for tile forms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// JSON tiles file. Overrides the configured source; saves are written back.
    #[arg(short, long)]
    tiles: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {e:#}");
        Config::default()
    });
    if let Some(path) = args.tiles {
        config.source.tiles_file = Some(path);
    }

    match &config.source.tiles_file {
        Some(path) => info!("Tiles file: {}", path.display()),
        None => info!("Serving mock tiles ({}ms delay)", config.source.delay_ms),
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, addr).await
}
