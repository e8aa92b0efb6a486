//! Repository for channel data access operations.

use futures::TryStreamExt;
use regex::Regex;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::entities::{Channel, ChannelId, NewChannel, UserId};
use crate::types::DatabaseResult;

/// Repository for channel and membership reads
#[derive(Clone)]
pub struct ChannelRepository {
    pool: SqlitePool,
}

impl ChannelRepository {
    /// Create a new channel repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the first channel, in insertion order, whose name matches `pattern`.
    ///
    /// Rows are streamed and the scan stops at the first hit, so later
    /// channels with a matching name are never looked at.
    pub async fn find_first_matching(&self, pattern: &Regex) -> DatabaseResult<Option<Channel>> {
        let hit = {
            let mut rows = sqlx::query("SELECT id, name FROM channels ORDER BY rowid").fetch(&self.pool);
            let mut hit = None;
            while let Some(row) = rows.try_next().await? {
                let name: String = row.try_get("name")?;
                if pattern.is_match(&name) {
                    let id: String = row.try_get("id")?;
                    hit = Some((ChannelId::new(id), name));
                    break;
                }
            }
            hit
        };

        let Some((id, name)) = hit else {
            debug!(pattern = %pattern, "no channel name matched");
            return Ok(None);
        };

        let members = self.members(&id).await?;
        debug!(channel_id = %id, name = %name, members = members.len(), "resolved channel");
        Ok(Some(Channel { id, name, members }))
    }

    /// Find a channel by its ID
    pub async fn find_by_id(&self, id: &ChannelId) -> DatabaseResult<Option<Channel>> {
        let row = sqlx::query("SELECT id, name FROM channels WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let name: String = row.try_get("name")?;
        let members = self.members(id).await?;
        Ok(Some(Channel {
            id: id.clone(),
            name,
            members,
        }))
    }

    /// Member ids of a channel in the order they joined
    pub async fn members(&self, id: &ChannelId) -> DatabaseResult<Vec<UserId>> {
        let members = sqlx::query_scalar::<_, String>(
            "SELECT user_id FROM channel_members WHERE channel_id = ? ORDER BY rowid",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(UserId::new)
        .collect();

        Ok(members)
    }

    /// Insert a channel with its initial member set
    pub async fn insert(&self, request: &NewChannel) -> DatabaseResult<Channel> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO channels (id, name) VALUES (?, ?)")
            .bind(request.id.as_str())
            .bind(&request.name)
            .execute(&mut *tx)
            .await?;

        for member in &request.members {
            sqlx::query("INSERT OR IGNORE INTO channel_members (channel_id, user_id) VALUES (?, ?)")
                .bind(request.id.as_str())
                .bind(member.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            channel_id = %request.id,
            name = %request.name,
            members = request.members.len(),
            "created channel"
        );

        self.find_by_id(&request.id)
            .await?
            .ok_or_else(|| crate::types::DatabaseError::invalid_data("inserted channel vanished"))
    }

    /// Add a member to a channel; adding an existing member is a no-op
    pub async fn add_member(&self, channel: &ChannelId, user: &UserId) -> DatabaseResult<()> {
        sqlx::query("INSERT OR IGNORE INTO channel_members (channel_id, user_id) VALUES (?, ?)")
            .bind(channel.as_str())
            .bind(user.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
