//! Axum route handlers for the Feedback API.
//!
//! Read accessors surface not-found as JSON null, never as an error; store
//! failures propagate through `AppError` and fail the request.

use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::card::build_card;
use crate::errors::AppError;
use crate::feedback::service::{create_feedback, CreateFeedbackRequest, CreateFeedbackResult};
use crate::models::feedback::FeedbackRow;
use crate::models::interview::InterviewRow;
use crate::state::AppState;
use crate::store;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Deserialize)]
pub struct LatestQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

/// Largest page a caller may request from the discovery feed.
const MAX_LATEST_LIMIT: i64 = 200;

/// Rejects limits outside [1, MAX_LATEST_LIMIT]; `None` falls through to the
/// store default.
fn check_latest_limit(limit: Option<i64>) -> Result<(), AppError> {
    match limit {
        Some(l) if l < 1 => Err(AppError::Validation("limit must be positive".to_string())),
        Some(l) if l > MAX_LATEST_LIMIT => Err(AppError::Validation(format!(
            "limit must not exceed {MAX_LATEST_LIMIT}"
        ))),
        _ => Ok(()),
    }
}

/// POST /api/v1/feedback
///
/// Generates and persists feedback for a transcript. Always responds 200 with
/// the collapsed result object — failure is `{"success": false}`, and the
/// caller must treat it as "no feedback was recorded".
pub async fn handle_create_feedback(
    State(state): State<AppState>,
    Json(request): Json<CreateFeedbackRequest>,
) -> Json<CreateFeedbackResult> {
    Json(create_feedback(&state.db, &state.llm, request).await)
}

/// GET /api/v1/interviews/:id
///
/// Returns the interview document, or JSON null when absent.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<InterviewRow>>, AppError> {
    let interview = store::interviews::get_interview_by_id(&state.db, id).await?;
    Ok(Json(interview))
}

/// GET /api/v1/interviews/:id/feedback?user_id=
///
/// Returns the user's feedback for the interview, or JSON null when absent.
pub async fn handle_get_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Option<FeedbackRow>>, AppError> {
    let feedback =
        store::feedback::get_feedback_by_interview_id(&state.db, id, params.user_id).await?;
    Ok(Json(feedback))
}

/// GET /api/v1/interviews/latest?user_id=&limit=
///
/// Discovery feed: finalized interviews by other users, newest first.
pub async fn handle_latest_interviews(
    State(state): State<AppState>,
    Query(params): Query<LatestQuery>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    check_latest_limit(params.limit)?;

    let interviews =
        store::interviews::get_latest_interviews(&state.db, params.user_id, params.limit).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews?user_id=
///
/// All interviews authored by the user, newest first.
pub async fn handle_user_interviews(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let interviews =
        store::interviews::get_interviews_by_user_id(&state.db, params.user_id).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/:id/card?user_id=
///
/// Renders the interview summary card, loading the feedback association
/// through the store accessor before building the view model.
pub async fn handle_interview_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Html<String>, AppError> {
    let interview = store::interviews::get_interview_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    let feedback =
        store::feedback::get_feedback_by_interview_id(&state.db, id, params.user_id).await?;

    let icons = state.icon_resolver.resolve(&interview.tech_stack).await;
    let card = build_card(&interview, feedback.as_ref(), icons);

    Ok(Html(card.to_html()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_within_bounds_accepted() {
        assert!(check_latest_limit(None).is_ok());
        assert!(check_latest_limit(Some(1)).is_ok());
        assert!(check_latest_limit(Some(MAX_LATEST_LIMIT)).is_ok());
    }

    #[test]
    fn test_non_positive_limit_rejected() {
        assert!(check_latest_limit(Some(0)).is_err());
        assert!(check_latest_limit(Some(-5)).is_err());
    }

    #[test]
    fn test_oversized_limit_rejected() {
        assert!(check_latest_limit(Some(MAX_LATEST_LIMIT + 1)).is_err());
        assert!(check_latest_limit(Some(i64::MAX)).is_err());
    }
}
