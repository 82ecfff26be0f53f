//! Inbound and outbound relay message type definitions.
//!
//! The wire format is JSON tagged by an `event` field. `data` and
//! `request_id` are opaque to the relay — clients may put any JSON value in
//! them, and `request_id` is echoed back bit-for-bit on the reply so clients
//! can correlate replies with outstanding requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages sent by a client to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InboundMessage {
    /// A request addressed to all hooks registered for `type`.
    SendMessage {
        /// Message type used for hook lookup (exact, case-sensitive match).
        #[serde(rename = "type")]
        message_type: String,
        /// Opaque request payload handed to every matched hook.
        #[serde(default)]
        data: Value,
        /// Opaque correlation token supplied by the client.
        request_id: Value,
    },
}

/// Messages sent by the relay to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Correlated reply to a `send_message` request, unicast to the
    /// originating connection.
    ReceiveMessage {
        /// Collapsed hook results: the bare value when exactly one hook
        /// matched, otherwise an ordered array.
        data: Value,
        /// Correlation token echoed from the request.
        request_id: Value,
    },
    /// Fire-and-forget event delivered to every connected client.
    Broadcast {
        /// Event type tag.
        #[serde(rename = "type")]
        message_type: String,
        /// Opaque event payload.
        data: Value,
    },
    /// Error reply.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
        /// Correlation token, when the failing request could be parsed.
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<Value>,
    },
}
