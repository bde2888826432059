/// User notifications
///
/// # Schema
///
/// ```sql
/// CREATE TABLE notifications (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     link VARCHAR(512) NOT NULL,
///     is_read BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Notification shown to a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub content: String,

    /// Site-relative link, e.g. `/questions/42`
    pub link: String,

    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification for a user
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        content: &str,
        link: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, content, link)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, content, link, is_read, created_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .bind(link)
        .fetch_one(pool)
        .await
    }
}

/// Shortens `text` to at most `max` characters
///
/// Text that fits is returned unchanged. Longer text keeps its first
/// `max - 3` characters followed by `...`, so the result is exactly `max`
/// characters long.
pub fn truncate_with_omission(text: &str, max: usize) -> String {
    const OMISSION: &str = "...";

    if text.chars().count() <= max {
        return text.to_string();
    }

    let keep = max.saturating_sub(OMISSION.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(OMISSION);
    truncated
}
