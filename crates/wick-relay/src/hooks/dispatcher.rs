//! Request dispatcher — fans a request out to matching hooks and collapses
//! their results.
//!
//! All matched handlers run concurrently and the dispatcher waits for every
//! one of them to settle; there is no cancellation and no timeout, so a hung
//! handler delays only its own request's reply. If any handler fails, the
//! caller gets an error carrying the first failure instead of a result — the
//! client always receives some reply.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, warn};

use wick_core::{AppError, AppResult};

use super::registry::HookRegistry;

/// Dispatches inbound requests to all hooks registered for their type.
pub struct MessageDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
}

impl MessageDispatcher {
    /// Creates a new dispatcher over a registry.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Runs every hook matching `message_type` against `data` and collapses
    /// the results into a reply value.
    ///
    /// Collapsing is deliberately asymmetric: when exactly one hook matched,
    /// the reply is that handler's bare value; when zero or several matched,
    /// the reply is the ordered array of results (registration order).
    /// Clients depend on exactly this shape. Zero matches is not an error —
    /// the result is an empty array.
    pub async fn dispatch(&self, message_type: &str, data: Value) -> AppResult<Value> {
        let handlers = self.registry.lookup(message_type).await;

        debug!(
            message_type = %message_type,
            handler_count = handlers.len(),
            "Dispatching request"
        );

        let settled = join_all(handlers.iter().map(|h| h.handle(data.clone()))).await;

        let mut results = Vec::with_capacity(settled.len());
        let mut first_failure: Option<AppError> = None;
        for (handler, result) in handlers.iter().zip(settled) {
            match result {
                Ok(value) => results.push(value),
                Err(e) => {
                    warn!(
                        message_type = %message_type,
                        hook = handler.name(),
                        error = %e,
                        "Hook handler failed"
                    );
                    if first_failure.is_none() {
                        first_failure =
                            Some(AppError::hook(format!("hook '{}': {}", handler.name(), e)));
                    }
                }
            }
        }

        if let Some(failure) = first_failure {
            return Err(failure);
        }

        Ok(if results.len() == 1 {
            results.remove(0)
        } else {
            Value::Array(results)
        })
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::registry::{FnHook, MessageHook};
    use serde_json::json;
    use std::future::Future;
    use std::time::Duration;

    fn hook<F, Fut>(name: &str, func: F) -> Arc<dyn MessageHook>
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Value>> + Send,
    {
        Arc::new(FnHook::new(name, func))
    }

    async fn dispatcher_with(hooks: Vec<(&str, Arc<dyn MessageHook>)>) -> MessageDispatcher {
        let registry = Arc::new(HookRegistry::new());
        for (message_type, handler) in hooks {
            registry.register(message_type, handler).await;
        }
        MessageDispatcher::new(registry)
    }

    #[tokio::test]
    async fn single_match_collapses_to_bare_value() {
        let dispatcher = dispatcher_with(vec![(
            "echo",
            hook("inc", |payload| async move {
                let value = payload["value"].as_i64().unwrap_or(0);
                Ok(json!(value + 1))
            }),
        )])
        .await;

        let result = dispatcher
            .dispatch("echo", json!({"value": 5}))
            .await
            .unwrap();
        assert_eq!(result, json!(6));
    }

    #[tokio::test]
    async fn multiple_matches_stay_a_sequence_in_registration_order() {
        let dispatcher = dispatcher_with(vec![
            ("ping", hook("a", |_| async { Ok(json!("a")) })),
            ("ping", hook("b", |_| async { Ok(json!("b")) })),
        ])
        .await;

        let result = dispatcher.dispatch("ping", Value::Null).await.unwrap();
        assert_eq!(result, json!(["a", "b"]));
    }

    #[tokio::test]
    async fn zero_matches_reply_with_empty_sequence() {
        let dispatcher = dispatcher_with(vec![]).await;
        let result = dispatcher.dispatch("nobody", Value::Null).await.unwrap();
        assert_eq!(result, json!([]));
    }

    #[tokio::test]
    async fn ordering_holds_even_when_later_hooks_settle_first() {
        let dispatcher = dispatcher_with(vec![
            (
                "race",
                hook("slow", |_| async {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(json!("slow"))
                }),
            ),
            ("race", hook("fast", |_| async { Ok(json!("fast")) })),
        ])
        .await;

        let result = dispatcher.dispatch("race", Value::Null).await.unwrap();
        assert_eq!(result, json!(["slow", "fast"]));
    }

    #[tokio::test]
    async fn failing_hook_turns_into_an_error() {
        let dispatcher = dispatcher_with(vec![
            ("mixed", hook("ok", |_| async { Ok(json!(1)) })),
            (
                "mixed",
                hook("broken", |_| async {
                    Err(AppError::internal("database on fire"))
                }),
            ),
        ])
        .await;

        let err = dispatcher.dispatch("mixed", Value::Null).await.unwrap_err();
        assert_eq!(err.kind, wick_core::error::ErrorKind::Hook);
        assert!(err.message.contains("broken"));
    }
}
