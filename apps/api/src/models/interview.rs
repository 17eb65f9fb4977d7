use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A mock interview session as stored in the `interviews` collection.
/// Created by the interview-setup flow; read-only in this service.
///
/// `created_at` is an RFC 3339 UTC string. Stored as TEXT so that the
/// column's lexicographic order matches chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub interview_type: String,
    pub tech_stack: Vec<String>,
    pub finalized: bool,
    pub created_at: String,
}
