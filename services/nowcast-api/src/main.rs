//! Nowcast API Server
//!
//! Polls the DWD RV radar composite on a fixed cadence and serves point
//! precipitation queries (series, interpolated value, next rain event)
//! over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{routing::get, Extension, Router};
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use nowcast_api::state::AppState;
use nowcast_api::{handlers, ingest};

/// Nowcast API Server
#[derive(Parser, Debug)]
#[command(name = "nowcast-api")]
#[command(about = "Point precipitation nowcasts from the DWD RV radar composite")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8084", env = "NOWCAST_LISTEN_ADDR")]
    listen: String,

    /// Composite container URL
    #[arg(
        long,
        env = "NOWCAST_SOURCE_URL",
        default_value = "https://opendata.dwd.de/weather/radar/composite/rv/DE1200_RV_LATEST.tar.bz2"
    )]
    source_url: String,

    /// Seconds between refresh cycles
    #[arg(long, env = "NOWCAST_REFRESH_INTERVAL_SECS", default_value = "300")]
    refresh_interval_secs: u64,

    /// Seconds one refresh attempt may run before it is abandoned
    #[arg(long, env = "NOWCAST_REFRESH_TIMEOUT_SECS", default_value = "60")]
    refresh_timeout_secs: u64,

    /// Run one refresh cycle and exit (vs continuous polling)
    #[arg(long)]
    once: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting nowcast API server");

    let state = Arc::new(AppState::new(args.source_url.clone())?);

    if args.once {
        info!("Running single refresh cycle");
        ingest::refresh_once(&state).await?;
        return Ok(());
    }

    // Background poller; queries serve whatever it last published
    {
        let state = state.clone();
        let interval = Duration::from_secs(args.refresh_interval_secs);
        let attempt_timeout = Duration::from_secs(args.refresh_timeout_secs);
        tokio::spawn(async move {
            ingest::run_refresh_loop(state, interval, attempt_timeout).await;
        });
    }

    // Build router
    let app = Router::new()
        .route("/v1/series", get(handlers::point::series_handler))
        .route("/v1/value", get(handlers::point::value_handler))
        .route("/v1/next-event", get(handlers::point::next_event_handler))
        // Health
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse()?;

    info!("Nowcast API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
