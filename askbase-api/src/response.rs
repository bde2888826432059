/// Non-error responses shared by the answer handlers
///
/// - [`FlashRedirect`]: `303 See Other` with a `Location` header and a JSON
///   body carrying the flash message the next page would show
/// - [`AnswerForm`]: the data behind the new/edit answer forms, including
///   validation errors when a submission is re-rendered
///
/// # Example
///
/// ```
/// use askbase_api::response::FlashRedirect;
/// use axum::{http::StatusCode, response::IntoResponse};
///
/// let response = FlashRedirect::to("/questions/1")
///     .with_notice("This answer is already deleted.")
///     .into_response();
///
/// assert_eq!(response.status(), StatusCode::SEE_OTHER);
/// assert_eq!(response.headers()["location"], "/questions/1");
/// ```

use askbase_shared::models::{answer::Answer, question::Question};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrorDetail;

/// Path of a question's page
pub fn question_path(question_id: i64) -> String {
    format!("/questions/{}", question_id)
}

/// Flash severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Error,
    Notice,
}

/// One-shot message for the page the client is redirected to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

/// Redirect with an optional flash message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashRedirect {
    pub redirect_to: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl FlashRedirect {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            redirect_to: path.into(),
            flash: None,
        }
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.with_flash(FlashKind::Error, message)
    }

    pub fn with_notice(self, message: impl Into<String>) -> Self {
        self.with_flash(FlashKind::Notice, message)
    }

    fn with_flash(mut self, kind: FlashKind, message: impl Into<String>) -> Self {
        self.flash = Some(Flash {
            kind,
            message: message.into(),
        });
        self
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let location = HeaderValue::from_str(&self.redirect_to);
        let mut response = (StatusCode::SEE_OTHER, Json(&self)).into_response();

        match location {
            Ok(value) => {
                response.headers_mut().insert(header::LOCATION, value);
            }
            Err(_) => {
                tracing::warn!(redirect_to = %self.redirect_to, "Redirect target is not a valid header value");
            }
        }

        response
    }
}

/// Answer fields shown in a form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerFields {
    /// Present when editing an existing answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub body: String,
}

/// New/edit answer form, possibly with validation errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerForm {
    pub question: Question,
    pub answer: AnswerFields,
    pub errors: Vec<ValidationErrorDetail>,

    #[serde(skip)]
    status: Option<u16>,
}

impl AnswerForm {
    /// Blank form for a new answer
    pub fn blank(question: Question) -> Self {
        Self {
            question,
            answer: AnswerFields {
                id: None,
                body: String::new(),
            },
            errors: Vec::new(),
            status: None,
        }
    }

    /// Form pre-filled from an existing answer
    pub fn editing(question: Question, answer: &Answer) -> Self {
        Self {
            question,
            answer: AnswerFields {
                id: Some(answer.id),
                body: answer.body.clone(),
            },
            errors: Vec::new(),
            status: None,
        }
    }

    /// Re-renders a rejected submission
    pub fn rejected(
        question: Question,
        answer_id: Option<i64>,
        body: String,
        errors: Vec<ValidationErrorDetail>,
    ) -> Self {
        Self {
            question,
            answer: AnswerFields { id: answer_id, body },
            errors,
            status: None,
        }
    }

    /// Overrides the default 200 status
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status.as_u16());
        self
    }
}

impl IntoResponse for AnswerForm {
    fn into_response(self) -> Response {
        let status = self
            .status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::OK);

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn question() -> Question {
        Question {
            id: 4,
            title: "Title".to_string(),
            body: String::new(),
            tags: "rust".to_string(),
            user_id: 1,
            score: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_question_path() {
        assert_eq!(question_path(12), "/questions/12");
    }

    #[test]
    fn test_flash_redirect_body() {
        let redirect = FlashRedirect::to("/questions/1").with_error("nope");
        let json = serde_json::to_value(&redirect).unwrap();

        assert_eq!(json["redirect_to"], "/questions/1");
        assert_eq!(json["flash"]["kind"], "error");
        assert_eq!(json["flash"]["message"], "nope");
    }

    #[test]
    fn test_plain_redirect_has_no_flash() {
        let json = serde_json::to_value(FlashRedirect::to("/")).unwrap();
        assert!(json.get("flash").is_none());
    }

    #[test]
    fn test_form_status() {
        let response = AnswerForm::blank(question()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = AnswerForm::rejected(question(), None, "short".to_string(), Vec::new())
            .with_status(StatusCode::UNPROCESSABLE_ENTITY)
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
