/// Vote model
///
/// Votes belong to answers. Only their counts matter to this service; vote
/// casting lives elsewhere.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE votes (
///     id BIGSERIAL PRIMARY KEY,
///     answer_id BIGINT NOT NULL REFERENCES answers(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     vote_type SMALLINT NOT NULL CHECK (vote_type IN (1, -1)),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (answer_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Direction of a vote, stored as `1` / `-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    /// Value stored in the `vote_type` column
    pub fn as_i16(&self) -> i16 {
        match self {
            VoteType::Up => 1,
            VoteType::Down => -1,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(VoteType::Up),
            -1 => Some(VoteType::Down),
            _ => None,
        }
    }
}

/// Vote on an answer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vote {
    pub id: i64,
    pub answer_id: i64,
    pub user_id: i64,

    /// `1` for an up-vote, `-1` for a down-vote
    pub vote_type: i16,

    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// Records a vote
    pub async fn create(
        pool: &PgPool,
        answer_id: i64,
        user_id: i64,
        vote_type: VoteType,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO votes (answer_id, user_id, vote_type)
            VALUES ($1, $2, $3)
            RETURNING id, answer_id, user_id, vote_type, created_at
            "#,
        )
        .bind(answer_id)
        .bind(user_id)
        .bind(vote_type.as_i16())
        .fetch_one(pool)
        .await
    }

    /// Counts the votes of one type on an answer
    pub async fn count_by_type(
        pool: &PgPool,
        answer_id: i64,
        vote_type: VoteType,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM votes WHERE answer_id = $1 AND vote_type = $2")
                .bind(answer_id)
                .bind(vote_type.as_i16())
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
