//! Connection registry
//!
//! Tracks all active WebSocket connections using DashMap for thread-safe
//! access. A connection is in the registry exactly while its socket is open.

use super::Connection;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The live set of connections eligible for broadcast
///
/// Keyed by connection ID, never by nickname (nicknames may collide).
pub struct ConnectionRegistry {
    connections: DashMap<String, Arc<Connection>>,
}

impl ConnectionRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    ///
    /// Registering an ID that is already present replaces the old handle;
    /// that is a caller error but leaves the registry consistent.
    pub fn register(
        &self,
        id: String,
        remote_addr: String,
        sender: mpsc::Sender<String>,
    ) -> Arc<Connection> {
        let connection = Connection::new(id.clone(), remote_addr, sender);
        self.connections.insert(id.clone(), connection.clone());

        tracing::debug!(connection_id = %id, "Connection registered");

        connection
    }

    /// Remove a connection
    ///
    /// A no-op when the ID is absent: a double close must never crash.
    pub fn unregister(&self, id: &str) {
        if self.connections.remove(id).is_some() {
            tracing::debug!(connection_id = %id, "Connection unregistered");
        }
    }

    /// Get a connection by ID
    pub fn get(&self, id: &str) -> Option<Arc<Connection>> {
        self.connections.get(id).map(|r| r.clone())
    }

    /// Check if a connection is registered
    pub fn contains(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    /// Visit every registered connection, in unspecified order
    ///
    /// The callback must not await and must not re-enter the registry for
    /// the connection it is visiting.
    pub fn for_each(&self, mut f: impl FnMut(&Arc<Connection>)) {
        for entry in self.connections.iter() {
            f(entry.value());
        }
    }

    /// Get the number of active connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .finish()
    }
}
