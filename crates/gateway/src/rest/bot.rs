//! The chatbot endpoint

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap};
use taut_chatbot::resolve_caller;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::state::GatewayState;

/// Header carrying the caller identity as JSON.
pub const USER_HEADER: &str = "x-user";

/// Answer a free-text question about channels, members and posts.
#[utoipa::path(
    post,
    path = "/v1/bot",
    tag = "Bot",
    request_body(content = String, content_type = "text/plain", description = "The question"),
    params(
        ("X-User" = String, Header, description = "Caller identity JSON, e.g. {\"id\":\"ck7u1\"}")
    ),
    responses(
        (status = 200, description = "Answer sentence", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing or malformed X-User header", body = crate::error::ErrorResponse),
        (status = 500, description = "Classifier or store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn ask_bot(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    question: String,
) -> GatewayResult<String> {
    let identity = headers
        .get(USER_HEADER)
        .ok_or_else(|| GatewayError::InvalidRequest("missing X-User header".to_string()))?
        .to_str()
        .map_err(|_| GatewayError::InvalidRequest("X-User header is not valid text".to_string()))?;

    let caller = resolve_caller(identity)?;
    debug!(caller = %caller, "resolved caller");

    let answer = state.chatbot().ask(&question, &caller).await?;
    Ok(answer)
}
