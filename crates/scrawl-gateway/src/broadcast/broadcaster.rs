//! Broadcaster
//!
//! Serializes an outbound event once and delivers the identical frame to
//! every connection in the registry. A failing recipient never blocks the
//! rest.

use crate::connection::ConnectionRegistry;
use crate::protocol::ServerEvent;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;

/// Delivers server events to all registered connections
pub struct Broadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl Broadcaster {
    /// Create a broadcaster over the given registry
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Broadcast one event to every registered connection
    ///
    /// Returns the number of connections delivery was attempted to. A full
    /// queue (slow peer) or a closed channel (peer racing its own
    /// disconnect) drops the frame for that peer only.
    pub fn broadcast(&self, event: &ServerEvent) -> usize {
        let frame = match event.to_json() {
            Ok(frame) => frame,
            Err(error) => {
                tracing::error!(%error, "Failed to serialize outbound event");
                return 0;
            }
        };

        let mut attempted = 0usize;
        let mut dropped = 0usize;

        self.registry.for_each(|conn| {
            attempted += 1;
            match conn.try_send(frame.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    dropped += 1;
                    tracing::warn!(
                        connection_id = %conn.id(),
                        "Outbound queue full, dropping frame for slow peer"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    dropped += 1;
                    tracing::debug!(
                        connection_id = %conn.id(),
                        "Peer already closed, dropping frame"
                    );
                }
            }
        });

        tracing::info!(clients = attempted, dropped, "Messaged clients");

        attempted
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("registry", &self.registry)
            .finish()
    }
}
