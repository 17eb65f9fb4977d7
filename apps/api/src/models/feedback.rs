use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::feedback::schema::CategoryScore;

/// An AI-generated feedback document as stored in the `feedback` collection.
///
/// `category_scores` decodes through `Json<Vec<CategoryScore>>` — a malformed
/// payload is rejected at the store boundary rather than trusted. The
/// five-category invariant itself is checked by the read path, which logs
/// stored documents that violate it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub user_id: Uuid,
    pub total_score: i32,
    pub category_scores: Json<Vec<CategoryScore>>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: String,
}
