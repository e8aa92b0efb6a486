//! User repository for database operations.

use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::entities::{NewUser, User, UserId};
use crate::types::{DatabaseError, DatabaseResult};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: &UserId) -> DatabaseResult<Option<User>> {
        let row = sqlx::query("SELECT id, first_name FROM users WHERE id = ?")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            Ok::<_, DatabaseError>(User {
                id: UserId::new(row.try_get::<String, _>("id")?),
                first_name: row.try_get("first_name")?,
            })
        })
        .transpose()
    }

    /// Insert a new user
    pub async fn insert(&self, request: &NewUser) -> DatabaseResult<User> {
        sqlx::query("INSERT INTO users (id, first_name) VALUES (?, ?)")
            .bind(request.id.as_str())
            .bind(&request.first_name)
            .execute(&self.pool)
            .await?;

        info!(user_id = %request.id, "created user");

        Ok(User {
            id: request.id.clone(),
            first_name: request.first_name.clone(),
        })
    }
}
