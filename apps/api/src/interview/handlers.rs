//! Axum route handlers for the interview flow.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::interview::classifier::classify;
use crate::interview::questions::{self, Prompt, Step, COMPLETION_MESSAGE};
use crate::interview::session_log::InterviewRecord;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub response: String,
    pub question_number: i64,
}

/// Either the next question or the completion message, plus any follow-up.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub follow_up_question: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /start_interview
pub async fn handle_start_interview() -> Json<Prompt> {
    Json(questions::first())
}

/// POST /submit_response
///
/// Classify → follow-up (only when no features were found) → log → next step.
pub async fn handle_submit_response(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let question_number = questions::validate_number(request.question_number)?;
    if request.response.trim().is_empty() {
        return Err(AppError::Validation("response cannot be empty".to_string()));
    }

    let entities = classify(&request.response, state.recognizer.as_ref()).await?;

    let follow_up_question = if entities.has_features() {
        None
    } else {
        Some(state.follow_up.follow_up(&request.response).await?)
    };

    let record = InterviewRecord {
        response: request.response,
        entities,
        follow_up_question,
        question_number,
        recorded_at: Utc::now(),
    };
    state.session_log.append(&record).await?;

    info!(
        "Recorded answer to question {} (features={}, platforms={}, goals={}, follow_up={})",
        question_number,
        record.entities.features.len(),
        record.entities.platforms.len(),
        record.entities.goals.len(),
        record.follow_up_question.is_some()
    );

    let response = match questions::next(question_number) {
        Step::Question(prompt) => SubmitResponse {
            question: Some(prompt.question),
            question_number: Some(prompt.question_number),
            message: None,
            follow_up_question: record.follow_up_question,
        },
        Step::Complete => SubmitResponse {
            question: None,
            question_number: None,
            message: Some(COMPLETION_MESSAGE),
            follow_up_question: record.follow_up_question,
        },
    };

    Ok(Json(response))
}
