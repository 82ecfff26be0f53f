//! Hook registry — in-process handlers register interest in message types.
//!
//! The registry is append-only: hooks are never removed, and its lifetime
//! equals the process's lifetime. Registration order is preserved and used
//! as the invocation order for fan-out, so callers may depend on it for
//! result ordering. Multiple hooks may share a message type.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use wick_core::AppResult;

/// Trait for message hook implementations.
///
/// A hook receives the opaque `data` payload of a matching request and
/// produces a value for the reply, synchronously or after awaiting I/O.
#[async_trait]
pub trait MessageHook: Send + Sync {
    /// Handles one request payload.
    async fn handle(&self, payload: Value) -> AppResult<Value>;

    /// Returns a short name for logs.
    fn name(&self) -> &str;
}

/// Adapter lifting a plain async closure into [`MessageHook`].
pub struct FnHook<F> {
    name: String,
    func: F,
}

impl<F> FnHook<F> {
    /// Wraps a closure under the given log name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

#[async_trait]
impl<F, Fut> MessageHook for FnHook<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = AppResult<Value>> + Send,
{
    async fn handle(&self, payload: Value) -> AppResult<Value> {
        (self.func)(payload).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Entry in the hook registry.
struct HookEntry {
    /// Message type this hook listens for.
    message_type: String,
    /// The handler.
    handler: Arc<dyn MessageHook>,
}

/// Insertion-ordered registry of message hooks.
pub struct HookRegistry {
    /// All hooks, in registration order.
    hooks: RwLock<Vec<HookEntry>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Registers a handler for a message type.
    ///
    /// Appends to the end of the sequence; never fails. No uniqueness
    /// constraint on `message_type`.
    pub async fn register(&self, message_type: impl Into<String>, handler: Arc<dyn MessageHook>) {
        let message_type = message_type.into();
        let mut hooks = self.hooks.write().await;
        info!(
            message_type = %message_type,
            hook = handler.name(),
            position = hooks.len(),
            "Message hook registered"
        );
        hooks.push(HookEntry {
            message_type,
            handler,
        });
    }

    /// Returns every handler whose type equals `message_type` exactly
    /// (case-sensitive, no wildcards), in registration order.
    pub async fn lookup(&self, message_type: &str) -> Vec<Arc<dyn MessageHook>> {
        let hooks = self.hooks.read().await;
        hooks
            .iter()
            .filter(|entry| entry.message_type == message_type)
            .map(|entry| entry.handler.clone())
            .collect()
    }

    /// Returns the number of handlers registered for a message type.
    pub async fn count_for(&self, message_type: &str) -> usize {
        let hooks = self.hooks.read().await;
        hooks
            .iter()
            .filter(|entry| entry.message_type == message_type)
            .count()
    }

    /// Returns the total number of registered hooks.
    pub async fn len(&self) -> usize {
        self.hooks.read().await.len()
    }

    /// Returns whether the registry holds no hooks.
    pub async fn is_empty(&self) -> bool {
        self.hooks.read().await.is_empty()
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
