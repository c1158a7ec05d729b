//! Per-connection identity
//!
//! Each connection carries a nickname and a display color for the lifetime
//! of the socket. Nothing here survives a disconnect.

use parking_lot::RwLock;
use rand::Rng;

/// Mutable identity state for one connection
pub struct Session {
    /// Display name, defaults to the remote address
    nickname: RwLock<String>,

    /// 3-digit hex display color, fixed at connect time
    color: String,
}

impl Session {
    /// Create a session for a connection from the given remote address
    #[must_use]
    pub fn new(remote_addr: &str) -> Self {
        Self {
            nickname: RwLock::new(remote_addr.to_string()),
            color: random_color(),
        }
    }

    /// Generate a new connection ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Get the current nickname
    pub fn nickname(&self) -> String {
        self.nickname.read().clone()
    }

    /// Replace the nickname
    ///
    /// No validation is applied: empty, duplicate, or odd names are all
    /// accepted as-is.
    pub fn set_nickname(&self, name: impl Into<String>) {
        *self.nickname.write() = name.into();
    }

    /// Get the display color (e.g. `#a3c`)
    pub fn color(&self) -> &str {
        &self.color
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("nickname", &self.nickname.read().as_str())
            .field("color", &self.color)
            .finish()
    }
}

/// Pick a random not-too-light color: three hex digits, each drawn from
/// `0..=13` to keep the channel away from near-white.
fn random_color() -> String {
    let mut rng = rand::thread_rng();
    let mut color = String::from("#");
    for _ in 0..3 {
        let digit: u8 = rng.gen_range(0..=13);
        color.push_str(&format!("{digit:x}"));
    }
    color
}
