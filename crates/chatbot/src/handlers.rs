//! The five query handlers.
//!
//! Each handler runs its reads strictly in sequence: the channel resolves
//! before members are looked up, members before their messages. Any store
//! failure aborts the handler; there are no partial answers.

use chrono::{DateTime, NaiveDate, Utc};
use taut_database::{PosterCount, UserId};
use tracing::debug;

use crate::error::QueryError;
use crate::intent::{DateEntity, Entities};
use crate::resolver::EntityResolver;
use crate::store::ChatStore;

/// Structured result of a successful handler, ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Names of the channel's members. `channel` is the fragment as asked.
    Members { channel: String, names: Vec<String> },
    /// Names of members with no message in the channel.
    NonPosters { channel: String, names: Vec<String> },
    /// Names of everyone tied for the highest message count.
    TopPosters { channel: String, names: Vec<String> },
    /// Time of the caller's most recent message.
    LastPost {
        channel: Option<String>,
        at: DateTime<Utc>,
    },
    /// The caller's message count. `channel` is the stored channel name.
    PostCount {
        channel: String,
        count: i64,
        day: Option<NaiveDate>,
    },
}

fn required_channel(entities: &Entities) -> Result<&str, QueryError> {
    entities
        .channel
        .as_deref()
        .ok_or(QueryError::MissingEntity("channel"))
}

/// Who is in the channel.
pub async fn members_of_channel(
    store: &dyn ChatStore,
    entities: &Entities,
) -> Result<Answer, QueryError> {
    let fragment = required_channel(entities)?;
    let resolver = EntityResolver::new(store);

    let channel = resolver.resolve_channel(fragment).await?;
    if !channel.has_members() {
        return Err(QueryError::NoMembers);
    }

    let names = resolver.first_names(&channel.members).await?;
    debug!(channel_id = %channel.id, members = channel.members.len(), named = names.len(), "listed channel members");

    Ok(Answer::Members {
        channel: fragment.to_string(),
        names,
    })
}

/// Members that have no message in the channel. Messages in other channels
/// do not count.
pub async fn members_without_posts(
    store: &dyn ChatStore,
    entities: &Entities,
) -> Result<Answer, QueryError> {
    let fragment = required_channel(entities)?;
    let resolver = EntityResolver::new(store);

    let channel = resolver.resolve_channel(fragment).await?;
    if !channel.has_members() {
        return Err(QueryError::NoMembers);
    }

    let mut silent = Vec::new();
    for member in &channel.members {
        if !store.has_posted_in(member, &channel.id).await? {
            silent.push(member.clone());
        }
    }

    let names = resolver.first_names(&silent).await?;
    debug!(channel_id = %channel.id, silent = silent.len(), "found members without posts");

    Ok(Answer::NonPosters {
        channel: fragment.to_string(),
        names,
    })
}

/// Everyone tied for the highest message count in the channel.
pub async fn top_posters(store: &dyn ChatStore, entities: &Entities) -> Result<Answer, QueryError> {
    let fragment = required_channel(entities)?;
    let resolver = EntityResolver::new(store);

    let channel = resolver.resolve_channel(fragment).await?;
    let counts = store.post_counts(&channel.id).await?;

    let winners = winning_posters(&counts);
    if winners.is_empty() {
        return Err(QueryError::NoData);
    }

    let names = resolver.first_names(&winners).await?;
    if names.is_empty() {
        return Err(QueryError::NoData);
    }

    debug!(channel_id = %channel.id, winners = winners.len(), "ranked posters");
    Ok(Answer::TopPosters {
        channel: fragment.to_string(),
        names,
    })
}

/// Every creator whose count equals the maximum, in the order given.
///
/// Ties need not be adjacent in `counts`.
pub fn winning_posters(counts: &[PosterCount]) -> Vec<UserId> {
    let Some(max) = counts.iter().map(|entry| entry.count).max() else {
        return Vec::new();
    };

    counts
        .iter()
        .filter(|entry| entry.count == max)
        .map(|entry| entry.creator_id.clone())
        .collect()
}

/// When the caller last posted, anywhere or in the named channel.
pub async fn last_post_time(
    store: &dyn ChatStore,
    entities: &Entities,
    caller: &UserId,
) -> Result<Answer, QueryError> {
    let channel = match entities.channel.as_deref() {
        Some(fragment) => Some(EntityResolver::new(store).resolve_channel(fragment).await?),
        None => None,
    };

    let message = store
        .latest_post(caller, channel.as_ref().map(|channel| &channel.id))
        .await?
        .ok_or(QueryError::NoData)?;

    Ok(Answer::LastPost {
        channel: entities.channel.clone(),
        at: message.created_at,
    })
}

/// How many times the caller posted to the channel, optionally on one day.
pub async fn post_count(
    store: &dyn ChatStore,
    entities: &Entities,
    caller: &UserId,
) -> Result<Answer, QueryError> {
    let fragment = required_channel(entities)?;

    let day = match &entities.datetime {
        None => None,
        Some(DateEntity::Day(day)) => Some(*day),
        Some(DateEntity::Unparseable(value)) => {
            debug!(value = %value, "datetime entity could not be parsed");
            return Err(QueryError::MissingEntity("datetime"));
        }
    };

    let channel = EntityResolver::new(store).resolve_channel(fragment).await?;
    let count = store
        .count_posts(caller, &channel.id, day.map(|day| day.window))
        .await?;

    Ok(Answer::PostCount {
        channel: channel.name,
        count,
        day: day.map(|day| day.date),
    })
}
