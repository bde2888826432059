/// In-memory store
///
/// Implements every repository trait over plain collections behind a single
/// mutex. Used by unit and router tests; it also offers seeding helpers and
/// switches that make selected writes fail, for exercising error paths.
///
/// # Example
///
/// ```
/// use askbase_shared::store::{memory::MemoryStore, UserRepository};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let alice = store.add_user("alice", 100, false).await;
///
/// let reputation = store.adjust_reputation(alice.id, 10).await.unwrap();
/// assert_eq!(reputation, Some(110));
/// # }
/// ```

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{
    AnswerRepository, HistoryRecorder, QuestionRepository, SettingsRepository, Store,
    StoreError, StoreResult, UserRepository, VoteRepository,
};
use crate::models::{
    answer::{Answer, DeletionState, NewAnswer},
    notification::Notification,
    post_history::{PostHistory, PostHistoryEvent},
    question::Question,
    user::User,
    vote::VoteType,
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
    questions: BTreeMap<i64, Question>,
    answers: BTreeMap<i64, Answer>,
    votes: Vec<(i64, VoteType)>,
    settings: BTreeMap<String, String>,
    privileges: BTreeMap<String, i64>,
    notifications: Vec<Notification>,
    history: Vec<PostHistory>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn insert_answer(&mut self, new: NewAnswer) -> Answer {
        let now = Utc::now();
        let answer = Answer {
            id: self.next_id(),
            body: new.body,
            user_id: new.user_id,
            question_id: new.question_id,
            score: new.score,
            deletion: DeletionState::Active,
            created_at: now,
            updated_at: now,
        };
        self.answers.insert(answer.id, answer.clone());
        answer
    }
}

/// Store holding everything in process memory
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    fail_deletion_writes: AtomicBool,
    fail_reputation_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `set_deletion_state` fail until switched off again
    pub fn fail_deletion_writes(&self, fail: bool) {
        self.fail_deletion_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes `adjust_reputation` fail until switched off again
    pub fn fail_reputation_writes(&self, fail: bool) {
        self.fail_reputation_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn add_user(&self, username: &str, reputation: i64, is_admin: bool) -> User {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let user = User {
            id: inner.next_id(),
            username: username.to_string(),
            reputation,
            is_admin,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        user
    }

    pub async fn add_question(&self, title: &str, tags: &str, user_id: i64) -> Question {
        let mut inner = self.inner.lock().await;
        let now = Utc::now();
        let question = Question {
            id: inner.next_id(),
            title: title.to_string(),
            body: String::new(),
            tags: tags.to_string(),
            user_id,
            score: 0,
            created_at: now,
            updated_at: now,
        };
        inner.questions.insert(question.id, question.clone());
        question
    }

    pub async fn add_answer(&self, question_id: i64, user_id: i64, body: &str) -> Answer {
        let mut inner = self.inner.lock().await;
        inner.insert_answer(NewAnswer {
            body: body.to_string(),
            user_id,
            question_id,
            score: 0,
        })
    }

    pub async fn add_votes(&self, answer_id: i64, vote_type: VoteType, count: usize) {
        let mut inner = self.inner.lock().await;
        inner
            .votes
            .extend(std::iter::repeat((answer_id, vote_type)).take(count));
    }

    pub async fn set_setting(&self, name: &str, value: &str) {
        let mut inner = self.inner.lock().await;
        inner.settings.insert(name.to_string(), value.to_string());
    }

    pub async fn set_privilege(&self, name: &str, threshold: i64) {
        let mut inner = self.inner.lock().await;
        inner.privileges.insert(name.to_string(), threshold);
    }

    /// History entries recorded for an answer, oldest first
    pub async fn history_for(&self, answer_id: i64) -> Vec<PostHistory> {
        let inner = self.inner.lock().await;
        inner
            .history
            .iter()
            .filter(|h| h.answer_id == answer_id)
            .cloned()
            .collect()
    }

    pub async fn notifications_for(&self, user_id: i64) -> Vec<Notification> {
        let inner = self.inner.lock().await;
        inner
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn answer_count(&self) -> usize {
        self.inner.lock().await.answers.len()
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn find_question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.inner.lock().await.questions.get(&id).cloned())
    }

    async fn list_questions(&self, limit: i64, offset: i64) -> StoreResult<Vec<Question>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .questions
            .values()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn count_questions(&self) -> StoreResult<i64> {
        Ok(self.inner.lock().await.questions.len() as i64)
    }

    async fn questions_tagged(&self, tag: &str) -> StoreResult<Vec<Question>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .questions
            .values()
            .filter(|q| q.has_tag_substring(tag))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AnswerRepository for MemoryStore {
    async fn find_answer(&self, id: i64) -> StoreResult<Option<Answer>> {
        Ok(self.inner.lock().await.answers.get(&id).cloned())
    }

    async fn answers_for_question(
        &self,
        question_id: i64,
        include_deleted: bool,
    ) -> StoreResult<Vec<Answer>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .answers
            .values()
            .filter(|a| a.question_id == question_id && (include_deleted || !a.is_deleted()))
            .cloned()
            .collect())
    }

    async fn insert_answer(&self, answer: NewAnswer) -> StoreResult<Answer> {
        Ok(self.inner.lock().await.insert_answer(answer))
    }

    async fn update_answer_body(&self, id: i64, body: &str) -> StoreResult<Option<Answer>> {
        let mut inner = self.inner.lock().await;
        Ok(inner.answers.get_mut(&id).map(|answer| {
            answer.body = body.to_string();
            answer.updated_at = Utc::now();
            answer.clone()
        }))
    }

    async fn set_deletion_state(&self, id: i64, state: DeletionState) -> StoreResult<bool> {
        if self.fail_deletion_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("deletion writes disabled".to_string()));
        }

        let mut inner = self.inner.lock().await;
        match inner.answers.get_mut(&id) {
            Some(answer) if answer.deletion.is_deleted() != state.is_deleted() => {
                answer.deletion = state;
                answer.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn count_votes_by_type(&self, post_id: i64, vote_type: VoteType) -> StoreResult<i64> {
        let inner = self.inner.lock().await;
        Ok(inner
            .votes
            .iter()
            .filter(|(answer_id, t)| *answer_id == post_id && *t == vote_type)
            .count() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.inner.lock().await.users.get(&id).cloned())
    }

    async fn adjust_reputation(&self, user_id: i64, delta: i64) -> StoreResult<Option<i64>> {
        if self.fail_reputation_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reputation writes disabled".to_string()));
        }

        let mut inner = self.inner.lock().await;
        Ok(inner.users.get_mut(&user_id).map(|user| {
            user.reputation += delta;
            user.updated_at = Utc::now();
            user.reputation
        }))
    }

    async fn create_notification(&self, user_id: i64, content: &str, link: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        let notification = Notification {
            id: inner.next_id(),
            user_id,
            content: content.to_string(),
            link: link.to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        inner.notifications.push(notification);
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn get_setting(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.inner.lock().await.settings.get(name).cloned())
    }

    async fn privilege_threshold(&self, name: &str) -> StoreResult<Option<i64>> {
        Ok(self.inner.lock().await.privileges.get(name).copied())
    }
}

#[async_trait]
impl HistoryRecorder for MemoryStore {
    async fn record_history(
        &self,
        answer_id: i64,
        actor_id: i64,
        event: PostHistoryEvent,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().await;
        inner.history.push(PostHistory {
            answer_id,
            user_id: actor_id,
            event,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
