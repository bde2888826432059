/// Answer endpoints
///
/// All routes here sit behind the JWT auth layer; the acting user comes from
/// the `AuthContext` extension.
///
/// # Endpoints
///
/// - `GET   /questions/:id/answers/new`: blank form
/// - `POST  /questions/:id/answers`: create an answer
/// - `GET   /answers/:id/edit`: edit form (requires Edit)
/// - `PATCH /answers/:id`: update the body (requires Edit)
/// - `POST  /answers/:id/delete`: soft-delete (requires Delete)
/// - `POST  /answers/:id/undelete`: restore (requires Delete)
///
/// Successful writes respond with a `303 See Other` to the question page. Rejected
/// submissions re-render the form with validation errors instead.
///
/// # Example
///
/// ```text
/// POST /questions/7/answers
/// Authorization: Bearer <token>
///
/// {"answer": {"body": "Use an Arc<Mutex<T>> and clone the Arc per task."}}
/// ```
///
/// Response:
/// ```text
/// 303 See Other
/// Location: /questions/7
///
/// {"redirect_to": "/questions/7"}
/// ```

use crate::{
    app::AppState,
    error::{validation_details, ApiError, ApiResult, RECORD_NOT_FOUND},
    response::{question_path, AnswerForm, FlashRedirect},
};
use askbase_shared::{
    auth::{
        authorization::{check_your_privilege, PrivilegeAction},
        middleware::AuthContext,
    },
    models::{
        answer::{Answer, DeletionState, NewAnswer},
        notification::truncate_with_omission,
        post_history::PostHistoryEvent,
        question::Question,
    },
    reputation::{Direction, ReputationCalculator},
    store::Store,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};
use validator::Validate;

/// Longest question title quoted in a new-answer notification
const NOTIFICATION_TITLE_LENGTH: usize = 50;

/// Request body for create and update
///
/// Only `answer.body` is read. Owner, parent and score are always set by
/// the server, whatever the client sends.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerParams {
    #[serde(default)]
    pub answer: AnswerInput,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnswerInput {
    #[serde(default)]
    #[validate(length(
        min = 30,
        max = 30000,
        message = "Body must be between 30 and 30000 characters"
    ))]
    pub body: String,
}

async fn find_question(state: &AppState, id: i64) -> ApiResult<Question> {
    state
        .store
        .find_question(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(RECORD_NOT_FOUND.to_string()))
}

async fn find_answer(state: &AppState, id: i64) -> ApiResult<Answer> {
    state
        .store
        .find_answer(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(RECORD_NOT_FOUND.to_string()))
}

/// Runs the privilege check, producing the denial redirect on failure
async fn require_privilege(
    state: &AppState,
    action: PrivilegeAction,
    auth: AuthContext,
    answer: &Answer,
) -> ApiResult<Option<FlashRedirect>> {
    if check_your_privilege(state.store.as_ref(), action, auth.user_id, answer).await? {
        return Ok(None);
    }

    info!(
        user_id = auth.user_id,
        answer_id = answer.id,
        action = %action,
        "Privilege denied"
    );

    Ok(Some(
        FlashRedirect::to(question_path(answer.question_id))
            .with_error(format!("You need the {} privilege to do that.", action)),
    ))
}

/// History is an audit trail; losing an entry does not fail the request
async fn record_history(store: &dyn Store, answer: &Answer, actor_id: i64, event: PostHistoryEvent) {
    if let Err(e) = store.record_history(answer.id, actor_id, event).await {
        warn!(answer_id = answer.id, actor_id, event = %event, error = %e, "Failed to record post history");
    }
}

/// Blank form for answering a question
pub async fn new_answer(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> ApiResult<AnswerForm> {
    let question = find_question(&state, question_id).await?;
    Ok(AnswerForm::blank(question))
}

/// Creates an answer owned by the current user
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(question_id): Path<i64>,
    Json(params): Json<AnswerParams>,
) -> ApiResult<Response> {
    let question = find_question(&state, question_id).await?;
    let body = params.answer.body.clone();

    if let Err(e) = params.answer.validate() {
        return Ok(AnswerForm::rejected(question, None, body, validation_details(&e))
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .into_response());
    }

    let answer = state
        .store
        .insert_answer(NewAnswer {
            body,
            user_id: auth.user_id,
            question_id: question.id,
            score: 0,
        })
        .await?;

    info!(
        answer_id = answer.id,
        question_id = question.id,
        user_id = auth.user_id,
        "Answer created"
    );

    let content = format!(
        "New answer to your question '{}'",
        truncate_with_omission(&question.title, NOTIFICATION_TITLE_LENGTH)
    );
    let link = question_path(question.id);

    if let Err(e) = state
        .store
        .create_notification(question.user_id, &content, &link)
        .await
    {
        warn!(user_id = question.user_id, error = %e, "Failed to notify question owner");
    }

    Ok(FlashRedirect::to(link).into_response())
}

/// Edit form, for users holding Edit on the answer
pub async fn edit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let answer = find_answer(&state, id).await?;

    if let Some(denied) = require_privilege(&state, PrivilegeAction::Edit, auth, &answer).await? {
        return Ok(denied.into_response());
    }

    let question = find_question(&state, answer.question_id).await?;
    Ok(AnswerForm::editing(question, &answer).into_response())
}

/// Replaces an answer's body
///
/// Order matters: privilege, then validation, then history, then the write.
/// A denied or invalid update leaves no history behind.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(params): Json<AnswerParams>,
) -> ApiResult<Response> {
    let answer = find_answer(&state, id).await?;

    if let Some(denied) = require_privilege(&state, PrivilegeAction::Edit, auth, &answer).await? {
        return Ok(denied.into_response());
    }

    let body = params.answer.body.clone();

    if let Err(e) = params.answer.validate() {
        let question = find_question(&state, answer.question_id).await?;
        return Ok(
            AnswerForm::rejected(question, Some(answer.id), body, validation_details(&e))
                .into_response(),
        );
    }

    record_history(state.store.as_ref(), &answer, auth.user_id, PostHistoryEvent::PostEdited).await;

    state
        .store
        .update_answer_body(answer.id, &body)
        .await?
        .ok_or_else(|| ApiError::NotFound(RECORD_NOT_FOUND.to_string()))?;

    info!(answer_id = answer.id, user_id = auth.user_id, "Answer updated");

    Ok(FlashRedirect::to(question_path(answer.question_id)).into_response())
}

/// Soft-delete or restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Delete,
    Undelete,
}

impl Transition {
    fn target(self) -> DeletionState {
        match self {
            Transition::Delete => DeletionState::Deleted { at: Utc::now() },
            Transition::Undelete => DeletionState::Active,
        }
    }

    fn event(self) -> PostHistoryEvent {
        match self {
            Transition::Delete => PostHistoryEvent::PostDeleted,
            Transition::Undelete => PostHistoryEvent::PostUndeleted,
        }
    }

    fn direction(self) -> Direction {
        match self {
            Transition::Delete => Direction::Revoke,
            Transition::Undelete => Direction::Grant,
        }
    }

    /// True if the answer is already where this transition would take it
    fn already_applied(self, answer: &Answer) -> bool {
        match self {
            Transition::Delete => answer.is_deleted(),
            Transition::Undelete => !answer.is_deleted(),
        }
    }

    fn already_applied_message(self) -> &'static str {
        match self {
            Transition::Delete => "This answer is already deleted.",
            Transition::Undelete => "This answer is not deleted.",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            Transition::Delete => "The answer could not be deleted.",
            Transition::Undelete => "The answer could not be undeleted.",
        }
    }

    fn reputation_failure_message(self) -> &'static str {
        match self {
            Transition::Delete => "The answer was deleted, but its author's reputation could not be updated.",
            Transition::Undelete => "The answer was undeleted, but its author's reputation could not be updated.",
        }
    }
}

/// Shared flow for delete and undelete
///
/// 1. Privilege check (Delete)
/// 2. No-op if the answer is already in the target state
/// 3. Conditional state write; a failed or lost write stops here
/// 4. History entry
/// 5. Reputation adjustment for the answer's owner
async fn transition(
    state: &AppState,
    auth: AuthContext,
    id: i64,
    transition: Transition,
) -> ApiResult<FlashRedirect> {
    let answer = find_answer(state, id).await?;
    let redirect = FlashRedirect::to(question_path(answer.question_id));

    if let Some(denied) = require_privilege(state, PrivilegeAction::Delete, auth, &answer).await? {
        return Ok(denied);
    }

    if transition.already_applied(&answer) {
        return Ok(redirect.with_notice(transition.already_applied_message()));
    }

    match state.store.set_deletion_state(answer.id, transition.target()).await {
        Ok(true) => {}
        Ok(false) => {
            // Another request got there first and owns the reputation change
            info!(answer_id = answer.id, transition = ?transition, "State already changed concurrently");
            return Ok(redirect.with_notice(transition.already_applied_message()));
        }
        Err(e) => {
            error!(answer_id = answer.id, transition = ?transition, error = %e, "Failed to write deletion state");
            return Ok(redirect.with_error(transition.failure_message()));
        }
    }

    info!(
        answer_id = answer.id,
        user_id = auth.user_id,
        transition = ?transition,
        "Answer deletion state changed"
    );

    record_history(state.store.as_ref(), &answer, auth.user_id, transition.event()).await;

    let calculator = ReputationCalculator::new(state.store.as_ref());
    match calculator
        .adjust(answer.user_id, answer.id, transition.direction())
        .await
    {
        Ok(_) => Ok(redirect),
        Err(e) => {
            error!(
                answer_id = answer.id,
                owner_id = answer.user_id,
                error = %e,
                "Failed to adjust reputation"
            );
            Ok(redirect.with_error(transition.reputation_failure_message()))
        }
    }
}

/// Soft-deletes an answer and revokes the reputation its votes earned
pub async fn destroy(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<FlashRedirect> {
    transition(&state, auth, id, Transition::Delete).await
}

/// Restores a deleted answer and grants its reputation back
pub async fn undelete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<FlashRedirect> {
    transition(&state, auth, id, Transition::Undelete).await
}
