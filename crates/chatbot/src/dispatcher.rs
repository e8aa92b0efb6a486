//! Routes a validated request to exactly one handler.

use std::sync::Arc;

use chrono::FixedOffset;
use taut_database::UserId;
use tracing::{debug, info};

use crate::error::{BotError, BotResult, QueryError};
use crate::formatter::{ResponseFormatter, APOLOGY};
use crate::handlers;
use crate::intent::{BotRequest, Intent};
use crate::store::ChatStore;

/// Holds the shared store handle; one instance serves all requests.
#[derive(Clone)]
pub struct IntentDispatcher {
    store: Arc<dyn ChatStore>,
    formatter: ResponseFormatter,
}

impl IntentDispatcher {
    pub fn new(store: Arc<dyn ChatStore>, local: FixedOffset) -> Self {
        Self {
            store,
            formatter: ResponseFormatter::new(local),
        }
    }

    pub fn local_offset(&self) -> FixedOffset {
        self.formatter.offset()
    }

    /// Answer `request` on behalf of `caller`.
    ///
    /// Expected outcomes (unknown intent, missing entity, unknown channel, no
    /// rows) come back as `Ok` sentences; only store failures are `Err`.
    pub async fn dispatch(&self, request: &BotRequest, caller: &UserId) -> BotResult<String> {
        let store = self.store.as_ref();
        let entities = &request.entities;

        debug!(intent = request.intent.as_str(), caller = %caller, ?entities, "dispatching request");

        let outcome = match request.intent {
            Intent::GetUsers => handlers::members_of_channel(store, entities).await,
            Intent::GetUsersNegation => handlers::members_without_posts(store, entities).await,
            Intent::GetHighestPoster => handlers::top_posters(store, entities).await,
            Intent::GetPostTime => handlers::last_post_time(store, entities, caller).await,
            Intent::GetPostCount => handlers::post_count(store, entities, caller).await,
            Intent::Unknown => {
                let cause = if request.raw_intent.is_some() { "unrecognised" } else { "absent" };
                info!(raw_intent = ?request.raw_intent, cause, "no handler for intent");
                return Ok(APOLOGY.to_string());
            }
        };

        match outcome {
            Ok(answer) => Ok(self.formatter.answer(&answer)),
            Err(QueryError::Store(error)) => Err(BotError::Store(error)),
            Err(rejection) => {
                info!(
                    intent = request.intent.as_str(),
                    outcome = rejection.kind(),
                    reason = %rejection,
                    "request rejected"
                );
                Ok(self.formatter.rejection(request.intent, &rejection))
            }
        }
    }
}
