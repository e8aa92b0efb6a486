//! Demo workspace for trying the bot locally.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use taut_database::{
    ChannelId, ChannelRepository, MessageRepository, NewChannel, NewMessage, NewUser, UserId,
    UserRepository,
};
use tracing::info;

const USERS: &[&str] = &["Dave", "Ann", "Bob", "Cy"];

/// Channel name, members (indexes into `USERS`) and posts as (author, hours ago).
const CHANNELS: &[(&str, &[usize], &[(usize, i64)])] = &[
    ("general", &[0, 1, 2, 3], &[(0, 50), (1, 49), (1, 26), (2, 25), (1, 3)]),
    ("dev", &[0, 1, 2], &[(2, 30), (2, 29), (0, 5), (2, 2)]),
    ("random", &[1, 3], &[]),
];

#[derive(Debug)]
pub struct SeededWorkspace {
    pub users: Vec<(UserId, String)>,
    pub channels: usize,
    pub messages: usize,
}

pub async fn seed_demo_workspace(pool: &SqlitePool) -> Result<SeededWorkspace> {
    let user_repo = UserRepository::new(pool.clone());
    let channel_repo = ChannelRepository::new(pool.clone());
    let message_repo = MessageRepository::new(pool.clone());

    let mut users = Vec::with_capacity(USERS.len());
    for first_name in USERS {
        let user = user_repo
            .insert(&NewUser {
                id: UserId::new(cuid2::create_id()),
                first_name: first_name.to_string(),
            })
            .await
            .with_context(|| format!("failed to insert user {first_name}"))?;
        users.push((user.id, user.first_name));
    }

    let now = Utc::now();
    let mut messages = 0;
    for (name, members, posts) in CHANNELS {
        let channel = channel_repo
            .insert(&NewChannel {
                id: ChannelId::new(cuid2::create_id()),
                name: name.to_string(),
                members: members.iter().map(|&index| users[index].0.clone()).collect(),
            })
            .await
            .with_context(|| format!("failed to insert channel {name}"))?;

        for &(author, hours_ago) in posts.iter() {
            message_repo
                .insert(&NewMessage {
                    id: cuid2::create_id(),
                    creator_id: users[author].0.clone(),
                    channel_id: channel.id.clone(),
                    body: Some(format!("hello from {}", users[author].1)),
                    created_at: now - Duration::hours(hours_ago),
                })
                .await
                .with_context(|| format!("failed to insert message in {name}"))?;
            messages += 1;
        }
    }

    info!(users = users.len(), channels = CHANNELS.len(), messages, "seeded demo workspace");

    Ok(SeededWorkspace {
        users,
        channels: CHANNELS.len(),
        messages,
    })
}
