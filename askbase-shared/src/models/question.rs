/// Question model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE questions (
///     id BIGSERIAL PRIMARY KEY,
///     title VARCHAR(255) NOT NULL,
///     body TEXT NOT NULL DEFAULT '',
///     tags TEXT NOT NULL DEFAULT '',
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     score INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Tags are a flat text field, not a join table. Tag filtering is a raw,
/// case-sensitive substring match against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Question
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub body: String,

    /// Free-text tag list, e.g. `"rust async tokio"`
    pub tags: String,

    /// Owner of the question
    pub user_id: i64,

    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestion {
    pub title: String,
    pub body: String,
    pub tags: String,
    pub user_id: i64,
}

impl Question {
    /// Returns true if the tags field contains `tag` as a substring
    ///
    /// Matching is case-sensitive and unanchored, so `"go"` also matches
    /// `"golang"` and `"mongo"`.
    pub fn has_tag_substring(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Creates a new question
    pub async fn create(pool: &PgPool, data: CreateQuestion) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (title, body, tags, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, body, tags, user_id, score, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.body)
        .bind(data.tags)
        .bind(data.user_id)
        .fetch_one(pool)
        .await
    }

    /// Finds a question by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, title, body, tags, user_id, score, created_at, updated_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lists questions in natural (ID) order with pagination
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, title, body, tags, user_id, score, created_at, updated_at
            FROM questions
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Counts all questions
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Finds every question whose tags field contains `tag`
    ///
    /// Uses `strpos` rather than `LIKE` so that `%` and `_` in the tag are
    /// matched literally.
    pub async fn tagged(pool: &PgPool, tag: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Question>(
            r#"
            SELECT id, title, body, tags, user_id, score, created_at, updated_at
            FROM questions
            WHERE strpos(tags, $1) > 0
            ORDER BY id
            "#,
        )
        .bind(tag)
        .fetch_all(pool)
        .await
    }
}
