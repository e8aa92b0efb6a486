//! REST API endpoints for the gateway

pub mod bot;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::state::GatewayState;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/v1/bot", post(bot::ask_bot))
        .route("/health", get(health::health_check))
}
