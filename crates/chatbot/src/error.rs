//! Error types for the chatbot core.

use taut_database::DatabaseError;
use thiserror::Error;

use crate::classifier::ClassifierError;
use crate::identity::IdentityError;

/// Outcome of a handler that did not produce an answer.
///
/// Everything except `Store` is an expected outcome that gets rendered as a
/// sentence.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("required entity `{0}` is missing")]
    MissingEntity(&'static str),

    #[error("no channel matches {0:?}")]
    ChannelNotFound(String),

    #[error("channel has no members")]
    NoMembers,

    #[error("query returned no rows")]
    NoData,

    #[error("store failure: {0}")]
    Store(#[from] DatabaseError),
}

impl QueryError {
    pub fn is_user_resolvable(&self) -> bool {
        !matches!(self, QueryError::Store(_))
    }

    /// Short tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::MissingEntity(_) => "missing_entity",
            QueryError::ChannelNotFound(_) => "channel_not_found",
            QueryError::NoMembers => "no_members",
            QueryError::NoData => "no_data",
            QueryError::Store(_) => "store",
        }
    }
}

/// Failures that reach the transport boundary.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("store failure: {0}")]
    Store(#[from] DatabaseError),

    #[error("classifier failure: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("invalid caller identity: {0}")]
    Identity(#[from] IdentityError),
}

pub type BotResult<T> = Result<T, BotError>;
