//! Caller identity forwarded by the authenticating gateway.

use serde::Deserialize;
use taut_database::UserId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("identity payload has an empty id")]
    EmptyId,
}

/// The pre-authenticated user as forwarded in the `X-User` header.
///
/// Only `id` is required; other profile fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Caller {
    pub id: String,
}

/// Resolve the identity payload to the caller's user id.
pub fn resolve_caller(payload: &str) -> Result<UserId, IdentityError> {
    let caller: Caller = serde_json::from_str(payload)?;
    let id = caller.id.trim();
    if id.is_empty() {
        return Err(IdentityError::EmptyId);
    }
    Ok(UserId::new(id))
}
