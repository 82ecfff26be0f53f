//! # wick-relay
//!
//! Relay engine for Wick. Provides:
//!
//! - Append-only hook registry keyed by message type
//! - Concurrent fan-out dispatch with correlated replies
//! - Connection pool with per-connection outbound queues
//! - Periodic "image" broadcast to every connected client
//!
//! The engine speaks typed messages only; serialization to the wire and the
//! socket lifecycle live in the transport layer on top of this crate.

pub mod broadcast;
pub mod connection;
pub mod hooks;
pub mod message;
pub mod server;

pub use connection::manager::ConnectionManager;
pub use hooks::registry::{FnHook, HookRegistry, MessageHook};
pub use message::types::{InboundMessage, OutboundMessage};
pub use server::RelayEngine;
