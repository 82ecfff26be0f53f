//! Fixed-interval image broadcast loop.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::watch;
use tokio::time;
use tracing::debug;

use crate::connection::manager::ConnectionManager;
use crate::message::types::OutboundMessage;

use super::image::daily_image_file_name;

/// Runs the periodic image broadcast until shutdown is signalled.
///
/// Each tick broadcasts an `image` event carrying the day's filename to
/// every connected client. The loop shares no state with request dispatch
/// other than the outbound broadcast path, so request traffic never
/// suspends it.
pub async fn run_image_broadcast(
    connections: Arc<ConnectionManager>,
    interval_seconds: u64,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut interval = time::interval(Duration::from_secs(interval_seconds));
    // The first tick completes immediately; consume it so the first
    // broadcast lands one full interval after startup.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let file_name = daily_image_file_name();
                debug!(file_name = %file_name, "Broadcasting daily image");
                connections.broadcast_all(&OutboundMessage::Broadcast {
                    message_type: "image".to_string(),
                    data: Value::String(file_name),
                });
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    debug!("Image broadcast loop ended");
}
