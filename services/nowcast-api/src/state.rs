//! Application state for the nowcast API.

use std::sync::Arc;

use anyhow::Result;
use nowcast::RadarService;
use reqwest::Client;

/// Shared application state.
pub struct AppState {
    /// Query front of the nowcast engine.
    pub service: Arc<RadarService>,

    /// HTTP client for composite downloads.
    pub client: Client,

    /// Composite container endpoint.
    pub source_url: String,
}

impl AppState {
    /// Create the application state around an empty radar service.
    ///
    /// The refresh loop owns the timeout for a whole refresh attempt,
    /// so the client itself carries no request timeout.
    pub fn new(source_url: String) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            service: Arc::new(RadarService::new()),
            client,
            source_url,
        })
    }
}
