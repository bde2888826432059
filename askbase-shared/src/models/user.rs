/// User model and database operations
///
/// Users own questions and answers and carry a running reputation total.
/// Authentication is handled elsewhere; this table only holds the identity
/// the rest of the application refers to.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     reputation BIGINT NOT NULL DEFAULT 1,
///     is_admin BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Display name, unique across users
    pub username: String,

    /// Running reputation total
    ///
    /// This is a cache of votes received times the configured weights and
    /// is kept in step by every delete/undelete of the user's posts.
    pub reputation: i64,

    /// Administrators hold every privilege
    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub reputation: i64,
    pub is_admin: bool,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, reputation, is_admin)
            VALUES ($1, $2, $3)
            RETURNING id, username, reputation, is_admin, created_at, updated_at
            "#,
        )
        .bind(data.username)
        .bind(data.reputation)
        .bind(data.is_admin)
        .fetch_one(pool)
        .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, reputation, is_admin, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Adds `delta` to a user's reputation and returns the new total
    ///
    /// The addition happens inside a single `UPDATE`, so concurrent
    /// adjustments for the same user cannot overwrite each other.
    ///
    /// # Returns
    ///
    /// The new reputation, or `None` if no user has this ID
    pub async fn adjust_reputation(
        pool: &PgPool,
        id: i64,
        delta: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let reputation: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE users
            SET reputation = reputation + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING reputation
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(pool)
        .await?;

        Ok(reputation.map(|(r,)| r))
    }
}
