//! Gateway state
//!
//! Shared application state for the relay server.

use crate::broadcast::Broadcaster;
use crate::connection::ConnectionRegistry;
use scrawl_common::AppConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Holds the connection registry, the broadcaster over it, and the loaded
/// configuration. Cheap to clone.
#[derive(Clone)]
pub struct GatewayState {
    /// Registry of live connections
    registry: Arc<ConnectionRegistry>,
    /// Broadcaster fanning events out over the registry
    broadcaster: Arc<Broadcaster>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(registry: Arc<ConnectionRegistry>, config: AppConfig) -> Self {
        let broadcaster = Arc::new(Broadcaster::new(registry.clone()));
        Self {
            registry,
            broadcaster,
            config: Arc::new(config),
        }
    }

    /// Get the connection registry
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Get the broadcaster
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish()
    }
}
