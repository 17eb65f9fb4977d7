use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::feedback::schema::check_category_invariant;
use crate::models::feedback::FeedbackRow;

/// Fetches at most one feedback document matching both interview and user.
/// `None` when no document matches. If duplicates exist (upstream write
/// discipline violated), whichever row the store yields first is returned.
pub async fn get_feedback_by_interview_id(
    pool: &PgPool,
    interview_id: Uuid,
    user_id: Uuid,
) -> Result<Option<FeedbackRow>, sqlx::Error> {
    let row = sqlx::query_as::<_, FeedbackRow>(
        "SELECT * FROM feedback WHERE interview_id = $1 AND user_id = $2 LIMIT 1",
    )
    .bind(interview_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    // Typed decode already rejects malformed payloads; a document that decodes
    // but violates the five-category invariant predates this service's write
    // validation — log it rather than trusting it silently.
    if let Some(row) = &row {
        if let Err(e) = check_category_invariant(&row.category_scores) {
            warn!("Stored feedback {} violates category invariant: {e}", row.id);
        }
    }

    Ok(row)
}

/// Writes a feedback document at its id: create when the id is fresh,
/// overwrite when the caller supplied an existing one.
pub async fn save_feedback(pool: &PgPool, row: &FeedbackRow) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO feedback
            (id, interview_id, user_id, total_score, category_scores,
             strengths, areas_for_improvement, final_assessment, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (id) DO UPDATE SET
            interview_id = EXCLUDED.interview_id,
            user_id = EXCLUDED.user_id,
            total_score = EXCLUDED.total_score,
            category_scores = EXCLUDED.category_scores,
            strengths = EXCLUDED.strengths,
            areas_for_improvement = EXCLUDED.areas_for_improvement,
            final_assessment = EXCLUDED.final_assessment,
            created_at = EXCLUDED.created_at
        "#,
    )
    .bind(row.id)
    .bind(row.interview_id)
    .bind(row.user_id)
    .bind(row.total_score)
    .bind(&row.category_scores)
    .bind(&row.strengths)
    .bind(&row.areas_for_improvement)
    .bind(&row.final_assessment)
    .bind(&row.created_at)
    .execute(pool)
    .await?;

    Ok(())
}
