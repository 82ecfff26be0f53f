//! Shared application state for the transport layer.

use std::sync::Arc;

use wick_core::config::AppConfig;
use wick_relay::RelayEngine;

/// State threaded through every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The relay engine.
    pub engine: Arc<RelayEngine>,
}
