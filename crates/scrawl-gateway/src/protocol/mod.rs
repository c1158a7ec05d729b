//! Relay wire protocol
//!
//! Flat JSON objects in both directions: inbound client events are decoded
//! and classified once; outbound events are serialized once per broadcast.

mod events;
mod server_events;

pub use events::{ClientEvent, NICK_PREFIX};
pub use server_events::{ServerEvent, DRAWLINE_ACTION};
