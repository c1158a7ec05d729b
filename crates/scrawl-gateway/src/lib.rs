//! # scrawl-gateway
//!
//! WebSocket relay server: every connected client's chat messages and
//! drawing strokes are fanned out to all connected clients.

pub mod broadcast;
pub mod connection;
pub mod dispatch;
pub mod protocol;
pub mod server;

pub use server::run;
