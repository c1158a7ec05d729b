//! Relay server setup
//!
//! Router construction and the listen loop.

mod handler;
mod state;

pub use handler::connect_handler;
pub use state::GatewayState;

use crate::connection::ConnectionRegistry;
use axum::{routing::get, Router};
use scrawl_common::{AppConfig, AppResult};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Create the relay router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/connect", get(connect_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the shared gateway state
pub fn create_gateway_state(config: AppConfig) -> GatewayState {
    let registry = ConnectionRegistry::new_shared();
    GatewayState::new(registry, config)
}

/// Run the relay server on the given address
pub async fn run_server(app: Router, addr: SocketAddr) -> AppResult<()> {
    tracing::info!("Starting relay server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Relay listening on ws://{}/connect", addr);

    // Connect-info service so handlers can see the remote address.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Run the complete relay server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr: SocketAddr = config
        .gateway
        .address()
        .parse()
        .map_err(|e| scrawl_common::AppError::config(format!("invalid listen address: {e}")))?;

    let state = create_gateway_state(config);
    let app = create_app(state);

    run_server(app, addr).await
}
