/// Repository traits used by the request handlers
///
/// Handlers never talk to the database directly; they go through these
/// traits so the same orchestration runs against PostgreSQL in production
/// ([`postgres::PgStore`]) and against an in-memory store in tests
/// ([`memory::MemoryStore`]).
///
/// Every trait is object safe. [`Store`] bundles them so application state
/// can hold a single `Arc<dyn Store>`.
///
/// # Example
///
/// ```no_run
/// use askbase_shared::models::vote::VoteType;
/// use askbase_shared::store::{postgres::PgStore, VoteRepository};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgStore::new(pool);
/// let up_votes = store.count_votes_by_type(42, VoteType::Up).await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;

use crate::models::{
    answer::{Answer, DeletionState, NewAnswer},
    post_history::PostHistoryEvent,
    question::Question,
    user::User,
    vote::VoteType,
};

pub mod memory;
pub mod postgres;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A record the operation depends on does not exist
    #[error("{kind} {id} not found")]
    MissingRecord { kind: &'static str, id: i64 },

    /// The backend refused or failed the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to questions
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn find_question(&self, id: i64) -> StoreResult<Option<Question>>;

    /// Questions in natural (ID) order
    async fn list_questions(&self, limit: i64, offset: i64) -> StoreResult<Vec<Question>>;

    async fn count_questions(&self) -> StoreResult<i64>;

    /// Questions whose tags field contains `tag` (case-sensitive substring)
    async fn questions_tagged(&self, tag: &str) -> StoreResult<Vec<Question>>;
}

/// Answers and their soft-delete state
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn find_answer(&self, id: i64) -> StoreResult<Option<Answer>>;

    async fn answers_for_question(
        &self,
        question_id: i64,
        include_deleted: bool,
    ) -> StoreResult<Vec<Answer>>;

    async fn insert_answer(&self, answer: NewAnswer) -> StoreResult<Answer>;

    async fn update_answer_body(&self, id: i64, body: &str) -> StoreResult<Option<Answer>>;

    /// Moves an answer into `state`
    ///
    /// Returns false without writing if the answer is missing or already
    /// in a state of the same kind.
    async fn set_deletion_state(&self, id: i64, state: DeletionState) -> StoreResult<bool>;
}

/// Vote counts
#[async_trait]
pub trait VoteRepository: Send + Sync {
    async fn count_votes_by_type(&self, post_id: i64, vote_type: VoteType) -> StoreResult<i64>;
}

/// Users, reputation and notifications
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>>;

    /// Adds `delta` to a user's reputation, returning the new total
    async fn adjust_reputation(&self, user_id: i64, delta: i64) -> StoreResult<Option<i64>>;

    async fn create_notification(&self, user_id: i64, content: &str, link: &str) -> StoreResult<()>;
}

/// Per-install settings and privilege thresholds
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Raw setting value, `None` if unset
    async fn get_setting(&self, name: &str) -> StoreResult<Option<String>>;

    /// Reputation required for a privilege, `None` if the privilege is unknown
    async fn privilege_threshold(&self, name: &str) -> StoreResult<Option<i64>>;
}

/// Write-only post history log
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    async fn record_history(
        &self,
        answer_id: i64,
        actor_id: i64,
        event: PostHistoryEvent,
    ) -> StoreResult<()>;
}

/// Everything a request handler needs from persistence
#[async_trait]
pub trait Store:
    QuestionRepository
    + AnswerRepository
    + VoteRepository
    + UserRepository
    + SettingsRepository
    + HistoryRecorder
{
    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}
