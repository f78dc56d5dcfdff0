//! Composite refresh: fetch, decode, publish.
//!
//! One refresh cycle downloads the latest composite container, builds a
//! snapshot set off the async runtime and publishes it on the shared
//! radar service. A failed or timed-out cycle leaves the previously
//! published set in place.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::Client;
use tracing::{error, info};

use nowcast::build_snapshot_set;

use crate::state::AppState;

/// Download the composite container from the configured endpoint.
pub async fn fetch_composite(client: &Client, url: &str) -> Result<Bytes> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting composite from {}", url))?;

    let response = response
        .error_for_status()
        .with_context(|| format!("composite endpoint {} answered with an error status", url))?;

    let bytes = response
        .bytes()
        .await
        .context("reading composite response body")?;

    Ok(bytes)
}

/// Run one refresh cycle end to end.
///
/// Decompression and decoding are CPU-bound, so they run on the
/// blocking pool rather than the async runtime.
pub async fn refresh_once(state: &AppState) -> Result<()> {
    let started = Instant::now();

    let bytes = fetch_composite(&state.client, &state.source_url).await?;
    let compressed_bytes = bytes.len();

    let set = tokio::task::spawn_blocking(move || build_snapshot_set(&bytes))
        .await
        .context("snapshot build task panicked")??;

    let frames = set.len();
    state
        .service
        .publish(set)
        .await
        .context("publishing snapshot set")?;

    info!(
        compressed_bytes,
        frames,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "refresh complete"
    );

    Ok(())
}

/// Poll the composite endpoint forever.
///
/// Each attempt is bounded by `attempt_timeout`; an attempt that fails
/// or overruns is logged and the loop simply waits for the next tick.
pub async fn run_refresh_loop(state: Arc<AppState>, interval: Duration, attempt_timeout: Duration) {
    loop {
        match tokio::time::timeout(attempt_timeout, refresh_once(&state)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(error = %e, "refresh failed");
            }
            Err(_) => {
                error!(
                    timeout_secs = attempt_timeout.as_secs(),
                    "refresh attempt timed out"
                );
            }
        }

        tokio::time::sleep(interval).await;
    }
}
