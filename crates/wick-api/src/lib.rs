//! # wick-api
//!
//! Transport layer for the Wick relay built on Axum.
//!
//! Exposes the WebSocket endpoint clients connect to and a health probe.
//! Framing, connection lifecycle, and reconnection are the socket layer's
//! concern; the relay engine behind it only ever sees parsed messages.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
