/// Question endpoints
///
/// Read-only and public:
///
/// - `GET /questions?page=N`: 50 questions per page, in ID order
/// - `GET /questions/tagged?tag=T`: questions whose tags contain `T`
/// - `GET /questions/:id`: one question with its active answers, bodies
///   rendered from Markdown and scrubbed

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, RECORD_NOT_FOUND},
};
use askbase_shared::{
    models::{answer::Answer, question::Question},
    render::render_safe,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Questions per index page
pub const PER_PAGE: i64 = 50;

/// Query parameters for the index
///
/// `page` is read as text so a malformed value falls back to page 1 instead
/// of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct IndexParams {
    pub page: Option<String>,
}

/// One page of questions
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub page: i64,
    pub per_page: i64,
    pub total_entries: i64,
    pub total_pages: i64,
}

/// Query parameters for the tag filter
#[derive(Debug, Default, Deserialize)]
pub struct TaggedParams {
    pub tag: Option<String>,
}

/// Tag filter results
#[derive(Debug, Serialize, Deserialize)]
pub struct TaggedResponse {
    pub tag: String,
    pub questions: Vec<Question>,
}

/// Answer as shown on a question page
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderedAnswer {
    pub id: i64,
    pub user_id: i64,
    pub score: i32,

    /// Raw Markdown
    pub body: String,

    /// Rendered and scrubbed HTML
    pub body_html: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Question page
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub answers: Vec<RenderedAnswer>,
}

/// Parses a page number; anything missing, malformed or below 1 is page 1
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

fn total_pages(total_entries: i64) -> i64 {
    (total_entries + PER_PAGE - 1) / PER_PAGE
}

/// Lists questions, 50 per page
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> ApiResult<Json<QuestionPage>> {
    let page = parse_page(params.page.as_deref());
    let offset = (page - 1).saturating_mul(PER_PAGE);

    let questions = state.store.list_questions(PER_PAGE, offset).await?;
    let total_entries = state.store.count_questions().await?;

    debug!(page, returned = questions.len(), total_entries, "Listed questions");

    Ok(Json(QuestionPage {
        questions,
        page,
        per_page: PER_PAGE,
        total_entries,
        total_pages: total_pages(total_entries),
    }))
}

/// Shows one question with its active answers
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<QuestionDetail>> {
    let question = state
        .store
        .find_question(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(RECORD_NOT_FOUND.to_string()))?;

    let answers = state
        .store
        .answers_for_question(question.id, false)
        .await?
        .into_iter()
        .map(|answer| render_answer(&state, answer))
        .collect();

    Ok(Json(QuestionDetail { question, answers }))
}

fn render_answer(state: &AppState, answer: Answer) -> RenderedAnswer {
    let body_html = render_safe(&state.renderer, &state.scrubber, &answer.body);

    RenderedAnswer {
        id: answer.id,
        user_id: answer.user_id,
        score: answer.score,
        body: answer.body,
        body_html,
        created_at: answer.created_at,
        updated_at: answer.updated_at,
    }
}

/// Lists every question whose tags contain the given text
///
/// Matching is a raw, case-sensitive substring test, so `go` also matches
/// `mongodb`.
pub async fn tagged(
    State(state): State<AppState>,
    Query(params): Query<TaggedParams>,
) -> ApiResult<Json<TaggedResponse>> {
    let tag = params
        .tag
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("tag parameter is required".to_string()))?;

    let questions = state.store.questions_tagged(&tag).await?;

    debug!(tag = %tag, matched = questions.len(), "Filtered questions by tag");

    Ok(Json(TaggedResponse { tag, questions }))
}
