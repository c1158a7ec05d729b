//! WebSocket handler
//!
//! Accepts upgrades on `/connect`, runs one receive task and one send task
//! per connection, and keeps the registry in sync with the socket
//! lifecycle.

use crate::connection::{Connection, Session};
use crate::dispatch::MessageDispatcher;
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, ConnectInfo, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// WebSocket upgrade handler for `/connect`
pub async fn connect_handler(
    State(state): State<GatewayState>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket, remote_addr))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(
    state: GatewayState,
    socket: axum::extract::ws::WebSocket,
    remote_addr: SocketAddr,
) {
    let connection_id = Session::generate_id();

    // Bounded queue to the writer task; broadcasts never block on a peer.
    let (tx, mut rx) = mpsc::channel::<String>(state.config().relay.send_buffer);

    let connection =
        state
            .registry()
            .register(connection_id.clone(), remote_addr.to_string(), tx);

    tracing::info!(
        connection_id = %connection_id,
        remote_addr = %remote_addr,
        "WebSocket opened"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Receive task: decode, classify, dispatch. Bad frames are dropped and
    // the connection stays open.
    let state_recv = state.clone();
    let connection_recv = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text);
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Binary frame ignored"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    tracing::trace!(connection_id = %connection_recv.id(), "Ping/pong");
                }
                Ok(Message::Close(frame)) => {
                    tracing::info!(
                        connection_id = %connection_recv.id(),
                        close_frame = ?frame,
                        "Client closed connection"
                    );
                    break;
                }
                Err(error) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        %error,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    // Send task: drain the outbound queue into the socket.
    let connection_id_send = connection_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_sink.send(Message::Text(frame)).await.is_err() {
                tracing::debug!(
                    connection_id = %connection_id_send,
                    "Failed to write to WebSocket"
                );
                break;
            }
        }

        let _ = ws_sink.close().await;
    });

    // Either task ending means the connection is done.
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    state.registry().unregister(&connection_id);

    tracing::info!(
        connection_id = %connection_id,
        remote_addr = %remote_addr,
        "WebSocket closed"
    );
}

/// Handle one text frame from the client
fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    tracing::debug!(
        connection_id = %connection.id(),
        frame = %text,
        "Client sent frame"
    );

    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(error) => {
            tracing::debug!(
                connection_id = %connection.id(),
                %error,
                "Failed to parse frame, dropped"
            );
            return;
        }
    };

    MessageDispatcher::dispatch(state, connection, event);
}
