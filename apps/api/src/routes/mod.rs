pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Feedback API
        .route("/api/v1/feedback", post(handlers::handle_create_feedback))
        // Interview accessors
        .route("/api/v1/interviews", get(handlers::handle_user_interviews))
        .route(
            "/api/v1/interviews/latest",
            get(handlers::handle_latest_interviews),
        )
        .route("/api/v1/interviews/:id", get(handlers::handle_get_interview))
        .route(
            "/api/v1/interviews/:id/feedback",
            get(handlers::handle_get_feedback),
        )
        .route(
            "/api/v1/interviews/:id/card",
            get(handlers::handle_interview_card),
        )
        .with_state(state)
}
