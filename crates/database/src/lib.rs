//! Taut Database Crate
//!
//! Connection management, migrations and repositories for the channel,
//! user and message collections the chatbot reads from.

use sqlx::SqlitePool;
use taut_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::{ChannelRepository, MessageRepository, UserRepository};

pub use entities::{
    channel::{Channel, ChannelId, NewChannel},
    message::{Message, NewMessage, PosterCount, TimeWindow},
    user::{NewUser, User, UserId},
};

pub use types::{errors::DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
