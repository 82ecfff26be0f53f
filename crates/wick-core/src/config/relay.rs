//! Relay engine configuration.

use serde::{Deserialize, Serialize};

/// Relay engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Per-connection outbound channel buffer size.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Interval between periodic image broadcasts in seconds.
    #[serde(default = "default_image_interval")]
    pub image_broadcast_interval_seconds: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            image_broadcast_interval_seconds: default_image_interval(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_image_interval() -> u64 {
    30
}
