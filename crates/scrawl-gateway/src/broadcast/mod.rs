//! Event broadcasting
//!
//! Fans one serialized event out to every registered connection.

mod broadcaster;

pub use broadcaster::Broadcaster;
