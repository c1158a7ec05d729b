//! Connection management
//!
//! Tracks live WebSocket connections and their per-connection identity.

mod connection;
mod registry;
mod session;

pub use connection::Connection;
pub use registry::ConnectionRegistry;
pub use session::Session;
