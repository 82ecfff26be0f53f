//! End-to-end relay behavior over a live WebSocket connection.

use std::sync::Arc;

use serde_json::{Value, json};

use wick_core::AppResult;
use wick_relay::hooks::registry::FnHook;

use crate::helpers::{TestRelay, recv_json, send_request};

#[tokio::test]
async fn single_hook_reply_is_a_bare_value() {
    let relay = TestRelay::start().await;
    relay
        .engine
        .register_hook(
            "echo",
            Arc::new(FnHook::new("inc", |payload: Value| async move {
                let value = payload["value"].as_i64().unwrap_or(0);
                AppResult::Ok(json!(value + 1))
            })),
        )
        .await;

    let mut client = relay.connect().await;
    send_request(&mut client, "echo", json!({"value": 5}), "r1").await;

    let reply = recv_json(&mut client).await;
    assert_eq!(
        reply,
        json!({"event":"receive_message","data":6,"request_id":"r1"})
    );
}

#[tokio::test]
async fn two_hooks_reply_as_ordered_sequence() {
    let relay = TestRelay::start().await;
    relay
        .engine
        .register_hook(
            "ping",
            Arc::new(FnHook::new("a", |_: Value| async {
                AppResult::Ok(json!("a"))
            })),
        )
        .await;
    relay
        .engine
        .register_hook(
            "ping",
            Arc::new(FnHook::new("b", |_: Value| async {
                AppResult::Ok(json!("b"))
            })),
        )
        .await;

    let mut client = relay.connect().await;
    send_request(&mut client, "ping", Value::Null, "r2").await;

    let reply = recv_json(&mut client).await;
    assert_eq!(
        reply,
        json!({"event":"receive_message","data":["a","b"],"request_id":"r2"})
    );
}

#[tokio::test]
async fn unmatched_request_replies_with_empty_sequence() {
    let relay = TestRelay::start().await;
    let mut client = relay.connect().await;

    send_request(&mut client, "unknown", Value::Null, "r3").await;

    let reply = recv_json(&mut client).await;
    assert_eq!(reply["event"], "receive_message");
    assert_eq!(reply["data"], json!([]));
    assert_eq!(reply["request_id"], "r3");
}

#[tokio::test]
async fn broadcast_reaches_all_connected_clients() {
    let relay = TestRelay::start().await;

    let mut first = relay.connect().await;
    let mut second = relay.connect().await;

    // A request round-trip on each connection guarantees both are
    // registered with the engine before the broadcast goes out.
    send_request(&mut first, "warmup", Value::Null, "w1").await;
    recv_json(&mut first).await;
    send_request(&mut second, "warmup", Value::Null, "w2").await;
    recv_json(&mut second).await;

    relay
        .engine
        .broadcast_message("image", json!("2024_6_1.png"));

    for client in [&mut first, &mut second] {
        let event = recv_json(client).await;
        assert_eq!(
            event,
            json!({"event":"broadcast","type":"image","data":"2024_6_1.png"})
        );
    }
}

#[tokio::test]
async fn replies_interleave_across_connections_by_request_id() {
    let relay = TestRelay::start().await;
    relay
        .engine
        .register_hook(
            "slow",
            Arc::new(FnHook::new("sleepy", |_: Value| async {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                AppResult::Ok(json!("late"))
            })),
        )
        .await;
    relay
        .engine
        .register_hook(
            "fast",
            Arc::new(FnHook::new("quick", |_: Value| async {
                AppResult::Ok(json!("early"))
            })),
        )
        .await;

    let mut slow_client = relay.connect().await;
    let mut fast_client = relay.connect().await;

    send_request(&mut slow_client, "slow", Value::Null, "r-slow").await;
    send_request(&mut fast_client, "fast", Value::Null, "r-fast").await;

    // The fast client is served while the slow request is still in flight.
    let fast_reply = recv_json(&mut fast_client).await;
    assert_eq!(fast_reply["data"], "early");
    assert_eq!(fast_reply["request_id"], "r-fast");

    let slow_reply = recv_json(&mut slow_client).await;
    assert_eq!(slow_reply["data"], "late");
    assert_eq!(slow_reply["request_id"], "r-slow");
}

#[tokio::test]
async fn failing_hook_yields_error_reply() {
    let relay = TestRelay::start().await;
    relay
        .engine
        .register_hook(
            "boom",
            Arc::new(FnHook::new("broken", |_: Value| async {
                AppResult::Err(wick_core::AppError::internal("no good"))
            })),
        )
        .await;

    let mut client = relay.connect().await;
    send_request(&mut client, "boom", Value::Null, "r-err").await;

    let reply = recv_json(&mut client).await;
    assert_eq!(reply["event"], "error");
    assert_eq!(reply["code"], "HOOK");
    assert_eq!(reply["request_id"], "r-err");
}
