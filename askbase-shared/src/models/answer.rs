/// Answer model and database operations
///
/// Answers are soft-deleted: a deleted answer keeps its body, score and votes
/// and can be restored. In memory the deletion status is a single
/// [`DeletionState`] value; on disk it is the `deleted` / `deleted_at` column
/// pair, which is only ever written as a pair.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE answers (
///     id BIGSERIAL PRIMARY KEY,
///     body TEXT NOT NULL,
///     user_id BIGINT NOT NULL REFERENCES users(id),
///     question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
///     score INTEGER NOT NULL DEFAULT 0,
///     deleted BOOLEAN NOT NULL DEFAULT FALSE,
///     deleted_at TIMESTAMPTZ,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT answers_deletion_pair CHECK (deleted = (deleted_at IS NOT NULL))
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Soft-delete status of an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DeletionState {
    /// Visible, counts towards the owner's reputation
    Active,

    /// Hidden; votes no longer count towards reputation
    Deleted {
        /// When the answer was deleted
        at: DateTime<Utc>,
    },
}

impl DeletionState {
    /// Builds the state from the stored column pair
    ///
    /// A row flagged deleted without a timestamp cannot be written through
    /// this crate (and is rejected by a CHECK constraint), but if one is read
    /// it is treated as deleted at `fallback`.
    pub fn from_columns(
        deleted: bool,
        deleted_at: Option<DateTime<Utc>>,
        fallback: DateTime<Utc>,
    ) -> Self {
        match (deleted, deleted_at) {
            (true, Some(at)) => DeletionState::Deleted { at },
            (true, None) => DeletionState::Deleted { at: fallback },
            (false, _) => DeletionState::Active,
        }
    }

    /// Returns the `(deleted, deleted_at)` column pair for this state
    pub fn to_columns(self) -> (bool, Option<DateTime<Utc>>) {
        match self {
            DeletionState::Active => (false, None),
            DeletionState::Deleted { at } => (true, Some(at)),
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionState::Deleted { .. })
    }
}

/// Answer to a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,

    /// Raw Markdown body
    pub body: String,

    /// Owner of the answer
    pub user_id: i64,

    /// Parent question
    pub question_id: i64,

    pub score: i32,

    /// Soft-delete status
    pub deletion: DeletionState,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw row as stored in the `answers` table
#[derive(Debug, sqlx::FromRow)]
struct AnswerRow {
    id: i64,
    body: String,
    user_id: i64,
    question_id: i64,
    score: i32,
    deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer {
            id: row.id,
            body: row.body,
            user_id: row.user_id,
            question_id: row.question_id,
            score: row.score,
            deletion: DeletionState::from_columns(row.deleted, row.deleted_at, row.updated_at),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating an answer
///
/// Every field except `body` is assigned by the server; nothing here is read
/// from client input.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub body: String,
    pub user_id: i64,
    pub question_id: i64,
    pub score: i32,
}

const ANSWER_COLUMNS: &str =
    "id, body, user_id, question_id, score, deleted, deleted_at, created_at, updated_at";

impl Answer {
    pub fn is_deleted(&self) -> bool {
        self.deletion.is_deleted()
    }

    /// Inserts a new, active answer
    pub async fn create(pool: &PgPool, data: NewAnswer) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            INSERT INTO answers (body, user_id, question_id, score)
            VALUES ($1, $2, $3, $4)
            RETURNING {ANSWER_COLUMNS}
            "#
        ))
        .bind(data.body)
        .bind(data.user_id)
        .bind(data.question_id)
        .bind(data.score)
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    /// Finds an answer by ID, deleted or not
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, AnswerRow>(&format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Lists the answers of a question in ID order
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: i64,
        include_deleted: bool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            SELECT {ANSWER_COLUMNS}
            FROM answers
            WHERE question_id = $1 AND ($2 OR NOT deleted)
            ORDER BY id
            "#
        ))
        .bind(question_id)
        .bind(include_deleted)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Replaces the body of an answer
    ///
    /// # Returns
    ///
    /// The updated answer, or `None` if it no longer exists
    pub async fn update_body(
        pool: &PgPool,
        id: i64,
        body: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, AnswerRow>(&format!(
            r#"
            UPDATE answers
            SET body = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {ANSWER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(body)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Moves an answer into `state`, writing both deletion columns at once
    ///
    /// The update only applies if the answer is currently in the opposite
    /// state, so two racing deletes cannot both succeed.
    ///
    /// # Returns
    ///
    /// True if the state changed, false if the answer was missing or
    /// already in `state`
    pub async fn set_deletion_state(
        pool: &PgPool,
        id: i64,
        state: DeletionState,
    ) -> Result<bool, sqlx::Error> {
        let (deleted, deleted_at) = state.to_columns();

        let result = sqlx::query(
            r#"
            UPDATE answers
            SET deleted = $2, deleted_at = $3, updated_at = NOW()
            WHERE id = $1 AND deleted <> $2
            "#,
        )
        .bind(id)
        .bind(deleted)
        .bind(deleted_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deletion_state_columns_are_paired() {
        let now = Utc::now();

        assert_eq!(DeletionState::Active.to_columns(), (false, None));
        assert_eq!(DeletionState::Deleted { at: now }.to_columns(), (true, Some(now)));
    }

    #[test]
    fn test_deletion_state_from_columns() {
        let now = Utc::now();
        let fallback = now - chrono::Duration::hours(1);

        assert_eq!(
            DeletionState::from_columns(false, None, fallback),
            DeletionState::Active
        );
        assert_eq!(
            DeletionState::from_columns(true, Some(now), fallback),
            DeletionState::Deleted { at: now }
        );
        assert_eq!(
            DeletionState::from_columns(true, None, fallback),
            DeletionState::Deleted { at: fallback }
        );
        // A stray timestamp without the flag is ignored
        assert_eq!(
            DeletionState::from_columns(false, Some(now), fallback),
            DeletionState::Active
        );
    }

    #[test]
    fn test_deletion_state_serialization() {
        let json = serde_json::to_value(DeletionState::Active).unwrap();
        assert_eq!(json["state"], "active");

        let json = serde_json::to_value(DeletionState::Deleted { at: Utc::now() }).unwrap();
        assert_eq!(json["state"], "deleted");
        assert!(json["at"].is_string());
    }
}
