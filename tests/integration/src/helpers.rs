//! Test helpers for integration tests
//!
//! Provides utilities for spawning a relay server on an ephemeral port and
//! connecting WebSocket test clients to it.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use scrawl_common::{AppConfig, AppSettings, Environment, RelayConfig, ServerConfig};
use scrawl_gateway::server::{create_app, create_gateway_state};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::{
    connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream,
};

/// How long to wait for an expected frame
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before declaring that no frame is coming
pub const SILENCE_TIMEOUT: Duration = Duration::from_millis(300);

/// Relay server instance bound to an ephemeral local port
pub struct TestServer {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let state = create_gateway_state(test_config());
        let app = create_app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// WebSocket URL of the relay endpoint
    pub fn ws_url(&self) -> String {
        format!("ws://{}/connect", self.addr)
    }

    /// Connect a new WebSocket client to this server
    pub async fn connect(&self) -> Result<TestClient> {
        TestClient::connect(&self.ws_url()).await
    }
}

/// Build a configuration suitable for tests
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "scrawl-test".to_string(),
            env: Environment::Development,
        },
        gateway: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        relay: RelayConfig::default(),
    }
}

/// One WebSocket client connected to a test server
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Open a WebSocket connection to the given URL
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _response) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Send a JSON value as one text frame
    pub async fn send_json(&mut self, value: &Value) -> Result<()> {
        self.send_raw(&value.to_string()).await
    }

    /// Send an arbitrary text frame
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next text frame and parse it as JSON
    ///
    /// Fails if nothing arrives within `RECV_TIMEOUT`.
    pub async fn recv_json(&mut self) -> Result<Value> {
        let deadline = tokio::time::timeout(RECV_TIMEOUT, async {
            while let Some(msg) = self.stream.next().await {
                if let Message::Text(text) = msg? {
                    return Ok(serde_json::from_str(&text)?);
                }
            }
            anyhow::bail!("connection closed while waiting for a frame")
        });

        deadline
            .await
            .map_err(|_| anyhow::anyhow!("timed out waiting for a frame"))?
    }

    /// Assert that no text frame arrives within `SILENCE_TIMEOUT`
    pub async fn expect_silence(&mut self) {
        let received = tokio::time::timeout(SILENCE_TIMEOUT, self.stream.next()).await;
        match received {
            Err(_) => {} // timeout: nothing arrived
            Ok(frame) => panic!("expected silence, got {frame:?}"),
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}
