//! Individual WebSocket connection
//!
//! Represents a single connection: its identity and its outbound queue.

use super::Session;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// A single WebSocket connection
///
/// The writer half of the socket is reached through a bounded channel of
/// pre-serialized text frames; the connection never blocks a broadcaster.
pub struct Connection {
    /// Unique connection ID (registry key)
    id: String,

    /// Remote peer address, fixed for the connection lifetime
    remote_addr: String,

    /// Nickname and color
    session: Session,

    /// Channel to the writer task for this socket
    sender: mpsc::Sender<String>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection handle
    pub fn new(id: String, remote_addr: String, sender: mpsc::Sender<String>) -> Arc<Self> {
        let session = Session::new(&remote_addr);
        Arc::new(Self {
            id,
            remote_addr,
            session,
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the remote peer address
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    /// Get the identity state
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Queue a frame for this connection without blocking
    ///
    /// Fails when the peer's queue is full (slow consumer) or its writer
    /// task is gone; the frame is dropped for this peer only.
    pub fn try_send(&self, frame: String) -> Result<(), mpsc::error::TrySendError<String>> {
        self.sender.try_send(frame)
    }

    /// Check if the writer task has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("remote_addr", &self.remote_addr)
            .field("session", &self.session)
            .finish()
    }
}
