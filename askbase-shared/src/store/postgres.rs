/// PostgreSQL-backed store
///
/// A thin adapter from the repository traits onto the model methods in
/// [`crate::models`].

use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    AnswerRepository, HistoryRecorder, QuestionRepository, SettingsRepository, Store,
    StoreResult, UserRepository, VoteRepository,
};
use crate::db::pool::health_check;
use crate::models::{
    answer::{Answer, DeletionState, NewAnswer},
    notification::Notification,
    post_history::{PostHistory, PostHistoryEvent},
    question::Question,
    setting::{Privilege, Setting},
    user::User,
    vote::{Vote, VoteType},
};

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for callers that need raw queries
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl QuestionRepository for PgStore {
    async fn find_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(Question::find_by_id(&self.pool, id).await?)
    }

    async fn list_questions(&self, limit: i64, offset: i64) -> StoreResult<Vec<Question>> {
        Ok(Question::list(&self.pool, limit, offset).await?)
    }

    async fn count_questions(&self) -> StoreResult<i64> {
        Ok(Question::count(&self.pool).await?)
    }

    async fn questions_tagged(&self, tag: &str) -> StoreResult<Vec<Question>> {
        Ok(Question::tagged(&self.pool, tag).await?)
    }
}

#[async_trait]
impl AnswerRepository for PgStore {
    async fn find_answer(&self, id: i64) -> StoreResult<Option<Answer>> {
        Ok(Answer::find_by_id(&self.pool, id).await?)
    }

    async fn answers_for_question(
        &self,
        question_id: i64,
        include_deleted: bool,
    ) -> StoreResult<Vec<Answer>> {
        Ok(Answer::list_by_question(&self.pool, question_id, include_deleted).await?)
    }

    async fn insert_answer(&self, answer: NewAnswer) -> StoreResult<Answer> {
        Ok(Answer::create(&self.pool, answer).await?)
    }

    async fn update_answer_body(&self, id: i64, body: &str) -> StoreResult<Option<Answer>> {
        Ok(Answer::update_body(&self.pool, id, body).await?)
    }

    async fn set_deletion_state(&self, id: i64, state: DeletionState) -> StoreResult<bool> {
        Ok(Answer::set_deletion_state(&self.pool, id, state).await?)
    }
}

#[async_trait]
impl VoteRepository for PgStore {
    async fn count_votes_by_type(&self, post_id: i64, vote_type: VoteType) -> StoreResult<i64> {
        Ok(Vote::count_by_type(&self.pool, post_id, vote_type).await?)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn adjust_reputation(&self, user_id: i64, delta: i64) -> StoreResult<Option<i64>> {
        Ok(User::adjust_reputation(&self.pool, user_id, delta).await?)
    }

    async fn create_notification(&self, user_id: i64, content: &str, link: &str) -> StoreResult<()> {
        Notification::create(&self.pool, user_id, content, link).await?;
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for PgStore {
    async fn get_setting(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(Setting::get(&self.pool, name).await?)
    }

    async fn privilege_threshold(&self, name: &str) -> StoreResult<Option<i64>> {
        Ok(Privilege::threshold(&self.pool, name).await?)
    }
}

#[async_trait]
impl HistoryRecorder for PgStore {
    async fn record_history(
        &self,
        answer_id: i64,
        actor_id: i64,
        event: PostHistoryEvent,
    ) -> StoreResult<()> {
        Ok(PostHistory::record(&self.pool, answer_id, actor_id, event).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}
