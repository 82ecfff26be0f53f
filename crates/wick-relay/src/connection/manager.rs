//! Connection manager — handles connection lifecycle and inbound routing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use wick_core::config::relay::RelayConfig;

use crate::hooks::dispatcher::MessageDispatcher;
use crate::message::serializer;
use crate::message::types::{InboundMessage, OutboundMessage};

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active client connections.
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Request dispatcher.
    dispatcher: Arc<MessageDispatcher>,
    /// Configuration.
    config: RelayConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RelayConfig, dispatcher: Arc<MessageDispatcher>) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            dispatcher,
            config,
        }
    }

    /// Registers a new connection.
    ///
    /// Returns the connection handle and the receiver the transport task
    /// drains for outbound messages.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(tx));
        self.pool.add(handle.clone());

        info!(conn_id = %handle.id, "Client connection registered");

        (handle, rx)
    }

    /// Unregisters a connection.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            info!(conn_id = %conn_id, "Client connection unregistered");
        }
    }

    /// Processes an inbound frame from a client.
    ///
    /// Each `send_message` request is dispatched on its own task, so requests
    /// from the same or different connections overlap freely and a slow hook
    /// delays only its own request's reply.
    pub fn handle_inbound(&self, conn_id: &ConnectionId, raw_message: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            warn!(conn_id = %conn_id, "Message from unknown connection");
            return;
        };

        let msg = match serializer::deserialize_inbound(raw_message) {
            Ok(m) => m,
            Err(e) => {
                handle.send(OutboundMessage::Error {
                    code: "INVALID_MESSAGE".to_string(),
                    message: format!("Failed to parse message: {e}"),
                    request_id: None,
                });
                return;
            }
        };

        match msg {
            InboundMessage::SendMessage {
                message_type,
                data,
                request_id,
            } => {
                let dispatcher = Arc::clone(&self.dispatcher);
                tokio::spawn(async move {
                    let reply = match dispatcher.dispatch(&message_type, data).await {
                        Ok(data) => OutboundMessage::ReceiveMessage { data, request_id },
                        Err(e) => OutboundMessage::Error {
                            code: e.kind.to_string(),
                            message: e.message.clone(),
                            request_id: Some(request_id),
                        },
                    };
                    if !handle.send(reply) {
                        debug!(conn_id = %handle.id, "Reply dropped, connection gone");
                    }
                });
            }
        }
    }

    /// Sends a message to every currently connected client.
    pub fn broadcast_all(&self, message: &OutboundMessage) {
        let all = self.pool.all_connections();
        let mut sent = 0usize;
        for conn in &all {
            if conn.send(message.clone()) {
                sent += 1;
            }
        }
        debug!(total = all.len(), sent, "Broadcast delivered");
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }
}
