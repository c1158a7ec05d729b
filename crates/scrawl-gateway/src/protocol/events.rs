//! Inbound client events
//!
//! One decode step turns a raw text frame into a `ClientEvent`; every later
//! stage matches on the variant instead of probing for fields.

use serde::Deserialize;
use serde_json::Value;

/// Command prefix for nickname changes
pub const NICK_PREFIX: &str = "/nick ";

/// Raw shape of an inbound frame; all fields optional
#[derive(Debug, Deserialize)]
struct RawEvent {
    message: Option<String>,
    action: Option<String>,
    from: Option<Value>,
    to: Option<Value>,
}

/// A classified inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// `/nick <name>`: change the sender's nickname, no broadcast
    NickChange { name: String },

    /// `/nick` with nothing after the prefix; dropped
    MalformedNick,

    /// A chat line to relay to everyone
    Chat { text: String },

    /// A drawing stroke to relay to everyone. `from` and `to` are opaque
    /// to the server (the client sends coordinate pairs).
    Drag { from: Value, to: Value },

    /// Anything else; logged and dropped
    Unrecognized,
}

impl ClientEvent {
    /// Decode and classify one inbound text frame
    ///
    /// Returns `Err` only when the payload is not a JSON object at all;
    /// recognizable-but-odd shapes come back as `Unrecognized`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let raw: RawEvent = serde_json::from_str(text)?;
        Ok(Self::classify(raw))
    }

    fn classify(raw: RawEvent) -> Self {
        if let Some(message) = raw.message {
            if let Some(rest) = message.strip_prefix(NICK_PREFIX) {
                // First whitespace-delimited token becomes the nickname.
                return match rest.split_whitespace().next() {
                    Some(name) => Self::NickChange {
                        name: name.to_string(),
                    },
                    None => Self::MalformedNick,
                };
            }
            return Self::Chat { text: message };
        }

        if raw.action.as_deref() == Some("drag") {
            if let (Some(from), Some(to)) = (raw.from, raw.to) {
                return Self::Drag { from, to };
            }
        }

        Self::Unrecognized
    }
}
