//! Integration tests for the Wick relay, driven over a real WebSocket.

mod helpers;
mod relay_test;
