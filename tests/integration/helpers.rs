//! Shared test fixtures: an in-process relay server and a WebSocket client.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use wick_api::state::AppState;
use wick_core::config::AppConfig;
use wick_relay::RelayEngine;

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A relay server bound to an ephemeral loopback port.
pub struct TestRelay {
    pub addr: SocketAddr,
    pub engine: Arc<RelayEngine>,
}

impl TestRelay {
    /// Starts a relay with default configuration on port 0.
    pub async fn start() -> Self {
        let config = AppConfig::default();
        let engine = Arc::new(RelayEngine::new(config.relay.clone()));

        let state = AppState {
            config: Arc::new(config),
            engine: Arc::clone(&engine),
        };
        let app = wick_api::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, engine }
    }

    /// Opens a WebSocket client connection to the relay.
    pub async fn connect(&self) -> WsClient {
        let url = format!("ws://{}/ws", self.addr);
        let (stream, _response) = tokio_tungstenite::connect_async(url).await.unwrap();
        stream
    }
}

/// Sends a `send_message` request frame.
pub async fn send_request(client: &mut WsClient, message_type: &str, data: Value, request_id: &str) {
    let frame = json!({
        "event": "send_message",
        "type": message_type,
        "data": data,
        "request_id": request_id,
    });
    client
        .send(Message::text(frame.to_string()))
        .await
        .unwrap();
}

/// Reads the next text frame and parses it as JSON.
pub async fn recv_json(client: &mut WsClient) -> Value {
    loop {
        let msg = client.next().await.expect("connection closed").unwrap();
        if msg.is_text() {
            let text = msg.into_text().unwrap();
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}
