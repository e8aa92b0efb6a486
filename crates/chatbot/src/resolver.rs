//! Entity resolution: channel fragments to channels, member ids to names.

use regex::RegexBuilder;
use taut_database::{Channel, UserId};
use tracing::debug;

use crate::error::QueryError;
use crate::store::ChatStore;

pub struct EntityResolver<'a> {
    store: &'a dyn ChatStore,
}

impl<'a> EntityResolver<'a> {
    pub fn new(store: &'a dyn ChatStore) -> Self {
        Self { store }
    }

    /// Resolve a free-text channel reference.
    ///
    /// The fragment matches any channel whose name contains it, ignoring
    /// case. When several channels match, the first in store order wins.
    pub async fn resolve_channel(&self, fragment: &str) -> Result<Channel, QueryError> {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Err(QueryError::MissingEntity("channel"));
        }

        let pattern = RegexBuilder::new(&regex::escape(fragment))
            .case_insensitive(true)
            .build()
            .map_err(|_| QueryError::ChannelNotFound(fragment.to_string()))?;

        match self.store.first_channel_matching(&pattern).await? {
            Some(channel) => Ok(channel),
            None => Err(QueryError::ChannelNotFound(fragment.to_string())),
        }
    }

    /// First names for `ids`, in order. Ids without a user are skipped.
    pub async fn first_names(&self, ids: &[UserId]) -> Result<Vec<String>, QueryError> {
        let mut names = Vec::with_capacity(ids.len());
        for id in ids {
            match self.store.user(id).await? {
                Some(user) => names.push(user.first_name),
                None => debug!(user_id = %id, "skipping dangling user reference"),
            }
        }
        Ok(names)
    }
}
