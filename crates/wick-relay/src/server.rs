//! Top-level relay engine that ties together all subsystems.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use wick_core::config::relay::RelayConfig;

use crate::broadcast::scheduler::run_image_broadcast;
use crate::connection::manager::ConnectionManager;
use crate::hooks::dispatcher::MessageDispatcher;
use crate::hooks::registry::{HookRegistry, MessageHook};
use crate::message::types::OutboundMessage;

/// Central relay engine that coordinates hooks, dispatch, and connections.
///
/// The registry is owned here and threaded through the dispatcher at
/// construction — there is no ambient process-wide hook state.
#[derive(Clone)]
pub struct RelayEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Hook registry.
    hooks: Arc<HookRegistry>,
    /// Engine configuration.
    config: RelayConfig,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
}

impl std::fmt::Debug for RelayEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayEngine").finish()
    }
}

impl RelayEngine {
    /// Creates a new relay engine with all subsystems.
    pub fn new(config: RelayConfig) -> Self {
        let (shutdown_tx, _) = watch::channel(false);

        let hooks = Arc::new(HookRegistry::new());
        let dispatcher = Arc::new(MessageDispatcher::new(hooks.clone()));
        let connections = Arc::new(ConnectionManager::new(config.clone(), dispatcher));

        info!("Relay engine initialized");

        Self {
            connections,
            hooks,
            config,
            shutdown_tx,
        }
    }

    /// Registers a hook for a message type.
    ///
    /// Hooks accumulate for the lifetime of the process; registration may
    /// happen at any time, including while requests are in flight.
    pub async fn register_hook(
        &self,
        message_type: impl Into<String>,
        handler: Arc<dyn MessageHook>,
    ) {
        self.hooks.register(message_type, handler).await;
    }

    /// Sends a fire-and-forget event to every connected client.
    ///
    /// Used by the periodic image task, and available to any other
    /// in-process producer.
    pub fn broadcast_message(&self, message_type: impl Into<String>, data: Value) {
        self.connections.broadcast_all(&OutboundMessage::Broadcast {
            message_type: message_type.into(),
            data,
        });
    }

    /// Spawns the periodic image broadcast task.
    pub fn start_image_broadcast(&self) -> JoinHandle<()> {
        let connections = self.connections.clone();
        let interval = self.config.image_broadcast_interval_seconds;
        let shutdown = self.shutdown_tx.subscribe();
        tokio::spawn(run_image_broadcast(connections, interval, shutdown))
    }

    /// Returns a reference to the hook registry.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Initiates a graceful shutdown of the relay engine.
    pub fn shutdown(&self) {
        info!("Shutting down relay engine");
        let _ = self.shutdown_tx.send(true);
    }
}
