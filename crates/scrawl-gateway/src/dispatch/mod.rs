//! Inbound event dispatch
//!
//! Routes one classified client event to its action: a session mutation, a
//! broadcast, or a logged drop. Nothing here errors back to the client or
//! closes the connection.

use crate::connection::Connection;
use crate::protocol::{ClientEvent, ServerEvent};
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch classified client events to their actions
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle one inbound event from a connection
    pub fn dispatch(state: &GatewayState, connection: &Arc<Connection>, event: ClientEvent) {
        match event {
            ClientEvent::NickChange { name } => Self::handle_nick(connection, name),
            ClientEvent::Chat { text } => Self::handle_chat(state, connection, text),
            ClientEvent::Drag { from, to } => Self::handle_drag(state, connection, from, to),
            ClientEvent::MalformedNick => {
                tracing::debug!(
                    connection_id = %connection.id(),
                    "Nickname command without an argument, dropped"
                );
            }
            ClientEvent::Unrecognized => {
                tracing::debug!(
                    connection_id = %connection.id(),
                    "Unrecognized event shape, dropped"
                );
            }
        }
    }

    /// Rename the sender; nickname changes are never broadcast
    fn handle_nick(connection: &Arc<Connection>, name: String) {
        tracing::debug!(
            connection_id = %connection.id(),
            nickname = %name,
            "Nickname changed"
        );
        connection.session().set_nickname(name);
    }

    /// Relay a chat line to everyone, sender included
    fn handle_chat(state: &GatewayState, connection: &Arc<Connection>, text: String) {
        let session = connection.session();
        let event = ServerEvent::chat(session.nickname(), session.color(), text);
        state.broadcaster().broadcast(&event);
    }

    /// Relay a drawing stroke to everyone, sender included
    fn handle_drag(
        state: &GatewayState,
        connection: &Arc<Connection>,
        from: serde_json::Value,
        to: serde_json::Value,
    ) {
        let session = connection.session();
        let event = ServerEvent::draw_line(session.nickname(), session.color(), from, to);
        state.broadcaster().broadcast(&event);
    }
}
