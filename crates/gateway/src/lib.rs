//! # Taut Gateway Crate
//!
//! HTTP surface of the chatbot. The authenticating gateway in front of this
//! service forwards the question as the request body and the caller identity
//! in the `X-User` header.
//!
//! ## Architecture
//!
//! - **REST**: `POST /v1/bot` and `GET /health`, documented with OpenAPI
//! - **State**: the shared [`taut_chatbot::Chatbot`]
//! - **Middleware**: CORS, tracing and request logging
//!
//! ## Usage
//!
//! ```rust,ignore
//! use taut_gateway::{create_router, GatewayState};
//!
//! let app = create_router(GatewayState::new(services.chatbot));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:4000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

use axum::{middleware as axum_middleware, Router};
use std::sync::Arc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let mut router = Router::new()
        .merge(rest::create_rest_routes().with_state(Arc::new(state)))
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware());

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(rest::bot::ask_bot, rest::health::health_check),
            components(schemas(rest::health::HealthResponse, error::ErrorResponse)),
            tags(
                (name = "Bot", description = "Questions about channels, members and posts"),
                (name = "Health", description = "Liveness"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
