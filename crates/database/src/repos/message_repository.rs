//! Repository for message data access operations.

use chrono::DateTime;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::{debug, info};

use crate::entities::{ChannelId, Message, NewMessage, PosterCount, TimeWindow, UserId};
use crate::types::{DatabaseError, DatabaseResult};

const LATEST_IN_CHANNEL: &str = "SELECT id, creator_id, channel_id, body, created_at FROM messages
     WHERE creator_id = ? AND channel_id = ? ORDER BY created_at DESC, rowid DESC LIMIT 1";

const LATEST_ANYWHERE: &str = "SELECT id, creator_id, channel_id, body, created_at FROM messages
     WHERE creator_id = ? ORDER BY created_at DESC, rowid DESC LIMIT 1";

/// Repository for message database operations
#[derive(Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether `creator` has at least one message in `channel`
    pub async fn exists_in_channel(&self, creator: &UserId, channel: &ChannelId) -> DatabaseResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM messages WHERE creator_id = ? AND channel_id = ?)",
        )
        .bind(creator.as_str())
        .bind(channel.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists != 0)
    }

    /// Message counts per creator in a channel, highest count first
    pub async fn count_by_creator(&self, channel: &ChannelId) -> DatabaseResult<Vec<PosterCount>> {
        let rows = sqlx::query(
            "SELECT creator_id, COUNT(*) AS count FROM messages WHERE channel_id = ?
             GROUP BY creator_id ORDER BY count DESC",
        )
        .bind(channel.as_str())
        .fetch_all(&self.pool)
        .await?;

        let counts = rows
            .into_iter()
            .map(|row| {
                Ok(PosterCount {
                    creator_id: UserId::new(row.try_get::<String, _>("creator_id")?),
                    count: row.try_get("count")?,
                })
            })
            .collect::<DatabaseResult<Vec<_>>>()?;

        debug!(channel_id = %channel, posters = counts.len(), "aggregated message counts");
        Ok(counts)
    }

    /// Most recent message by `creator`, optionally restricted to one channel
    pub async fn latest_by_creator(
        &self,
        creator: &UserId,
        channel: Option<&ChannelId>,
    ) -> DatabaseResult<Option<Message>> {
        let row = match channel {
            Some(channel) => {
                sqlx::query(LATEST_IN_CHANNEL)
                .bind(creator.as_str())
                .bind(channel.as_str())
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query(LATEST_ANYWHERE)
                .bind(creator.as_str())
                .fetch_optional(&self.pool)
                .await?
            }
        };

        row.as_ref().map(message_from_row).transpose()
    }

    /// Count messages by `creator` in `channel`, optionally within a time window
    pub async fn count_for_creator(
        &self,
        creator: &UserId,
        channel: &ChannelId,
        window: Option<TimeWindow>,
    ) -> DatabaseResult<i64> {
        let count: i64 = match window {
            Some(window) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM messages WHERE creator_id = ? AND channel_id = ?
                     AND created_at >= ? AND created_at < ?",
                )
                .bind(creator.as_str())
                .bind(channel.as_str())
                .bind(window.start.timestamp_millis())
                .bind(window.end.timestamp_millis())
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM messages WHERE creator_id = ? AND channel_id = ?",
                )
                .bind(creator.as_str())
                .bind(channel.as_str())
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(count)
    }

    /// Insert a new message
    pub async fn insert(&self, request: &NewMessage) -> DatabaseResult<Message> {
        sqlx::query(
            "INSERT INTO messages (id, creator_id, channel_id, body, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&request.id)
        .bind(request.creator_id.as_str())
        .bind(request.channel_id.as_str())
        .bind(&request.body)
        .bind(request.created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        info!(
            message_id = %request.id,
            channel_id = %request.channel_id,
            creator_id = %request.creator_id,
            "created new message"
        );

        Ok(Message {
            id: request.id.clone(),
            creator_id: request.creator_id.clone(),
            channel_id: request.channel_id.clone(),
            body: request.body.clone(),
            created_at: request.created_at,
        })
    }
}

fn message_from_row(row: &SqliteRow) -> DatabaseResult<Message> {
    let millis: i64 = row.try_get("created_at")?;
    let created_at = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| DatabaseError::invalid_data(format!("created_at out of range: {millis}")))?;

    Ok(Message {
        id: row.try_get("id")?,
        creator_id: UserId::new(row.try_get::<String, _>("creator_id")?),
        channel_id: ChannelId::new(row.try_get::<String, _>("channel_id")?),
        body: row.try_get("body")?,
        created_at,
    })
}
