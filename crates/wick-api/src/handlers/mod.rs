//! Request handlers for the transport layer.

pub mod health;
pub mod ws;
