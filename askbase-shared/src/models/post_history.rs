/// Post history events
///
/// An append-only log of moderation-relevant changes to answers.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE post_histories (
///     id BIGSERIAL PRIMARY KEY,
///     answer_id BIGINT NOT NULL REFERENCES answers(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     event VARCHAR(32) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;

/// Kind of change recorded against a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostHistoryEvent {
    PostEdited,
    PostDeleted,
    PostUndeleted,
}

impl PostHistoryEvent {
    /// Value stored in the `event` column
    pub fn as_str(&self) -> &'static str {
        match self {
            PostHistoryEvent::PostEdited => "post_edited",
            PostHistoryEvent::PostDeleted => "post_deleted",
            PostHistoryEvent::PostUndeleted => "post_undeleted",
        }
    }
}

impl fmt::Display for PostHistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostHistory {
    pub answer_id: i64,

    /// Who made the change
    pub user_id: i64,

    pub event: PostHistoryEvent,
    pub created_at: DateTime<Utc>,
}

impl PostHistory {
    /// Appends an entry to the log
    pub async fn record(
        pool: &PgPool,
        answer_id: i64,
        user_id: i64,
        event: PostHistoryEvent,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO post_histories (answer_id, user_id, event) VALUES ($1, $2, $3)")
            .bind(answer_id)
            .bind(user_id)
            .bind(event.as_str())
            .execute(pool)
            .await?;

        Ok(())
    }
}
