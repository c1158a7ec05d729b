//! Outbound server events
//!
//! Events the server constructs and broadcasts. Serialized exactly once per
//! broadcast; the same frame goes to every recipient.

use serde::Serialize;
use serde_json::Value;

/// Action tag on relayed drawing strokes
pub const DRAWLINE_ACTION: &str = "drawline";

/// An event the server broadcasts to every connection
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerEvent {
    /// A relayed chat line, attributed to its sender
    Chat {
        client: String,
        color: String,
        message: String,
    },

    /// A relayed drawing stroke; `from`/`to` pass through untouched
    DrawLine {
        client: String,
        color: String,
        action: &'static str,
        from: Value,
        to: Value,
    },
}

impl ServerEvent {
    /// Build a chat broadcast
    #[must_use]
    pub fn chat(client: impl Into<String>, color: impl Into<String>, message: String) -> Self {
        Self::Chat {
            client: client.into(),
            color: color.into(),
            message,
        }
    }

    /// Build a drawing-stroke broadcast
    #[must_use]
    pub fn draw_line(
        client: impl Into<String>,
        color: impl Into<String>,
        from: Value,
        to: Value,
    ) -> Self {
        Self::DrawLine {
            client: client.into(),
            color: color.into(),
            action: DRAWLINE_ACTION,
            from,
            to,
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
