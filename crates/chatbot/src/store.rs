//! Read access to the channel, user and message collections.

use async_trait::async_trait;
use regex::Regex;
use sqlx::SqlitePool;
use taut_database::{
    Channel, ChannelId, ChannelRepository, DatabaseResult, Message, MessageRepository,
    PosterCount, TimeWindow, User, UserId, UserRepository,
};

/// The reads the query handlers issue. Implementations must be safe to share
/// across concurrent requests.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// First channel in natural order whose name matches `pattern`.
    async fn first_channel_matching(&self, pattern: &Regex) -> DatabaseResult<Option<Channel>>;

    async fn user(&self, id: &UserId) -> DatabaseResult<Option<User>>;

    /// Whether `creator` has any message in `channel`.
    async fn has_posted_in(&self, creator: &UserId, channel: &ChannelId) -> DatabaseResult<bool>;

    /// Per-creator message counts in `channel`, sorted by count descending.
    async fn post_counts(&self, channel: &ChannelId) -> DatabaseResult<Vec<PosterCount>>;

    async fn latest_post(
        &self,
        creator: &UserId,
        channel: Option<&ChannelId>,
    ) -> DatabaseResult<Option<Message>>;

    async fn count_posts(
        &self,
        creator: &UserId,
        channel: &ChannelId,
        window: Option<TimeWindow>,
    ) -> DatabaseResult<i64>;
}

/// `ChatStore` backed by the SQLite repositories.
#[derive(Clone)]
pub struct SqliteChatStore {
    channels: ChannelRepository,
    users: UserRepository,
    messages: MessageRepository,
}

impl SqliteChatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            channels: ChannelRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
        }
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    async fn first_channel_matching(&self, pattern: &Regex) -> DatabaseResult<Option<Channel>> {
        self.channels.find_first_matching(pattern).await
    }

    async fn user(&self, id: &UserId) -> DatabaseResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn has_posted_in(&self, creator: &UserId, channel: &ChannelId) -> DatabaseResult<bool> {
        self.messages.exists_in_channel(creator, channel).await
    }

    async fn post_counts(&self, channel: &ChannelId) -> DatabaseResult<Vec<PosterCount>> {
        self.messages.count_by_creator(channel).await
    }

    async fn latest_post(
        &self,
        creator: &UserId,
        channel: Option<&ChannelId>,
    ) -> DatabaseResult<Option<Message>> {
        self.messages.latest_by_creator(creator, channel).await
    }

    async fn count_posts(
        &self,
        creator: &UserId,
        channel: &ChannelId,
        window: Option<TimeWindow>,
    ) -> DatabaseResult<i64> {
        self.messages.count_for_creator(creator, channel, window).await
    }
}
