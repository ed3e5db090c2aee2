//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It is
//! immutable after start-up: the parsed config and one pooled HTTP client used
//! for every forwarded backend call.

use std::sync::Arc;

use crate::config::ConsoleConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    /// Build state with a client honouring the configured backend timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: ConsoleConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()?;
        Ok(Self { config: Arc::new(config), http })
    }
}
