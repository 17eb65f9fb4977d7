use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::InterviewRow;

/// Default page size for the latest-interviews discovery feed.
pub const DEFAULT_LATEST_LIMIT: i64 = 20;

/// Fetches a single interview by document id. `None` when absent.
pub async fn get_interview_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Latest finalized interviews authored by OTHER users, newest first.
/// Returns at most `limit` rows; an empty match is an empty vector.
pub async fn get_latest_interviews(
    pool: &PgPool,
    user_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<InterviewRow>, sqlx::Error> {
    let limit = limit.unwrap_or(DEFAULT_LATEST_LIMIT);

    sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews \
         WHERE finalized = TRUE AND user_id != $1 \
         ORDER BY created_at DESC \
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// All interviews authored by `user_id`, newest first.
pub async fn get_interviews_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<InterviewRow>, sqlx::Error> {
    sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
