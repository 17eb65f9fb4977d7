//! Feedback generation pipeline.
//!
//! Orchestrates: transcript formatting → LLM evaluation call → schema
//! validation → persistence. The caller-facing contract is deliberately
//! collapsed: any failure after entry — model, validation, or store — is
//! caught, logged, and reported as `{success: false}` with no partial
//! feedback surfaced.
//!
//! The model call and the write path sit behind `TranscriptEvaluator` and
//! `FeedbackSink` trait objects so the pipeline is testable without a live
//! model or database; `LlmClient` and `PgPool` are the production backends.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::prompts::{FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM};
use crate::feedback::schema::FeedbackObject;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::feedback::FeedbackRow;
use crate::store;

/// One turn of the interview transcript: who spoke and what they said.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: String,
    pub content: String,
}

/// Request body for feedback generation.
/// `feedback_id` overwrites an existing document; absent means create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedbackRequest {
    pub interview_id: Uuid,
    pub user_id: Uuid,
    pub transcript: Vec<TranscriptTurn>,
    pub feedback_id: Option<Uuid>,
}

/// Collapsed result contract: success carries the document id, failure
/// carries nothing. Callers must treat non-success as "no feedback recorded".
#[derive(Debug, Clone, Serialize)]
pub struct CreateFeedbackResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<Uuid>,
}

/// Evaluates a formatted transcript block into a structured feedback object.
/// Production backend: `LlmClient` with the fixed rubric prompt.
#[async_trait]
pub trait TranscriptEvaluator: Send + Sync {
    async fn evaluate(&self, transcript: &str) -> Result<FeedbackObject, LlmError>;
}

#[async_trait]
impl TranscriptEvaluator for LlmClient {
    async fn evaluate(&self, transcript: &str) -> Result<FeedbackObject, LlmError> {
        let prompt = FEEDBACK_PROMPT_TEMPLATE.replace("{transcript}", transcript);
        self.call_json(&prompt, FEEDBACK_SYSTEM).await
    }
}

/// Writes a feedback document at its id. Production backend: `PgPool` via
/// the store upsert.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn save(&self, row: &FeedbackRow) -> Result<(), AppError>;
}

#[async_trait]
impl FeedbackSink for PgPool {
    async fn save(&self, row: &FeedbackRow) -> Result<(), AppError> {
        store::feedback::save_feedback(self, row).await?;
        Ok(())
    }
}

/// Concatenates transcript turns into the newline-delimited `- role: content`
/// block embedded in the evaluation prompt. An empty transcript yields an
/// empty block.
pub fn format_transcript(turns: &[TranscriptTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("- {}: {}\n", turn.role, turn.content))
        .collect()
}

/// Generates and persists feedback for an interview transcript.
///
/// Best-effort, fail-closed: never returns an error. A failed model call or
/// store write is logged and collapses to `{success: false}`.
pub async fn create_feedback(
    pool: &PgPool,
    llm: &LlmClient,
    request: CreateFeedbackRequest,
) -> CreateFeedbackResult {
    create_feedback_with(llm, pool, request).await
}

/// Backend-agnostic pipeline entry. Same collapsed contract as
/// `create_feedback`; success is only reported after the sink write completed.
pub async fn create_feedback_with(
    evaluator: &dyn TranscriptEvaluator,
    sink: &dyn FeedbackSink,
    request: CreateFeedbackRequest,
) -> CreateFeedbackResult {
    let interview_id = request.interview_id;

    match generate_and_persist(evaluator, sink, request).await {
        Ok(feedback_id) => {
            info!("Feedback {feedback_id} saved for interview {interview_id}");
            CreateFeedbackResult {
                success: true,
                feedback_id: Some(feedback_id),
            }
        }
        Err(e) => {
            error!("Error saving feedback for interview {interview_id}: {e}");
            CreateFeedbackResult {
                success: false,
                feedback_id: None,
            }
        }
    }
}

async fn generate_and_persist(
    evaluator: &dyn TranscriptEvaluator,
    sink: &dyn FeedbackSink,
    request: CreateFeedbackRequest,
) -> Result<Uuid, AppError> {
    let transcript = format_transcript(&request.transcript);

    let object = evaluator
        .evaluate(&transcript)
        .await
        .map_err(|e| AppError::Llm(format!("feedback evaluation failed: {e}")))?;

    object
        .validate()
        .map_err(|e| AppError::Llm(format!("model output violated feedback schema: {e}")))?;

    // Caller-supplied id overwrites that document; otherwise allocate fresh
    let feedback_id = request.feedback_id.unwrap_or_else(Uuid::new_v4);

    let row = FeedbackRow {
        id: feedback_id,
        interview_id: request.interview_id,
        user_id: request.user_id,
        total_score: object.total_score as i32,
        category_scores: Json(object.category_scores),
        strengths: object.strengths,
        areas_for_improvement: object.areas_for_improvement,
        final_assessment: object.final_assessment,
        created_at: Utc::now().to_rfc3339(),
    };

    sink.save(&row).await?;

    Ok(feedback_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::feedback::schema::{CategoryScore, FEEDBACK_CATEGORIES};

    fn turn(role: &str, content: &str) -> TranscriptTurn {
        TranscriptTurn {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    fn request(feedback_id: Option<Uuid>) -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            interview_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            transcript: vec![turn("candidate", "Hello")],
            feedback_id,
        }
    }

    fn valid_object() -> FeedbackObject {
        FeedbackObject {
            total_score: 72,
            category_scores: FEEDBACK_CATEGORIES
                .iter()
                .map(|name| CategoryScore {
                    name: name.to_string(),
                    score: 70,
                    comment: "solid".to_string(),
                })
                .collect(),
            strengths: vec!["Clear structure".to_string()],
            areas_for_improvement: vec!["Quantify impact".to_string()],
            final_assessment: "Promising but needs depth.".to_string(),
        }
    }

    /// Returns a canned evaluation regardless of transcript.
    struct StubEvaluator(FeedbackObject);

    #[async_trait]
    impl TranscriptEvaluator for StubEvaluator {
        async fn evaluate(&self, _transcript: &str) -> Result<FeedbackObject, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct FailingEvaluator;

    #[async_trait]
    impl TranscriptEvaluator for FailingEvaluator {
        async fn evaluate(&self, _transcript: &str) -> Result<FeedbackObject, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    /// Records every saved row instead of touching a database.
    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<FeedbackRow>>,
    }

    #[async_trait]
    impl FeedbackSink for RecordingSink {
        async fn save(&self, row: &FeedbackRow) -> Result<(), AppError> {
            self.saved.lock().unwrap().push(row.clone());
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl FeedbackSink for FailingSink {
        async fn save(&self, _row: &FeedbackRow) -> Result<(), AppError> {
            Err(sqlx::Error::PoolClosed.into())
        }
    }

    #[test]
    fn test_format_transcript_empty_yields_empty_block() {
        assert_eq!(format_transcript(&[]), "");
    }

    #[test]
    fn test_format_transcript_single_turn() {
        let turns = vec![turn("interviewer", "Tell me about yourself.")];
        assert_eq!(
            format_transcript(&turns),
            "- interviewer: Tell me about yourself.\n"
        );
    }

    #[test]
    fn test_format_transcript_preserves_order() {
        let turns = vec![
            turn("interviewer", "What is ownership in Rust?"),
            turn("candidate", "Each value has a single owner."),
            turn("interviewer", "And borrowing?"),
        ];
        let formatted = format_transcript(&turns);
        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("- interviewer:"));
        assert!(lines[1].starts_with("- candidate:"));
        assert_eq!(lines[2], "- interviewer: And borrowing?");
    }

    #[tokio::test]
    async fn test_supplied_feedback_id_is_the_saved_document_id() {
        let existing_id = Uuid::new_v4();
        let sink = RecordingSink::default();
        let evaluator = StubEvaluator(valid_object());

        let result = create_feedback_with(&evaluator, &sink, request(Some(existing_id))).await;

        assert!(result.success);
        assert_eq!(result.feedback_id, Some(existing_id));
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, existing_id);
    }

    #[tokio::test]
    async fn test_absent_feedback_id_allocates_fresh_ids() {
        let sink = RecordingSink::default();
        let evaluator = StubEvaluator(valid_object());

        let first = create_feedback_with(&evaluator, &sink, request(None)).await;
        let second = create_feedback_with(&evaluator, &sink, request(None)).await;

        assert!(first.success && second.success);
        assert_ne!(first.feedback_id, second.feedback_id);
        let saved = sink.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(Some(saved[0].id), first.feedback_id);
        assert_eq!(Some(saved[1].id), second.feedback_id);
    }

    #[tokio::test]
    async fn test_schema_violating_output_collapses_without_persisting() {
        let mut object = valid_object();
        object.category_scores.pop(); // four categories — violates the invariant
        let sink = RecordingSink::default();
        let evaluator = StubEvaluator(object);

        let result = create_feedback_with(&evaluator, &sink, request(None)).await;

        assert!(!result.success);
        assert!(result.feedback_id.is_none());
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_collapses_without_persisting() {
        let sink = RecordingSink::default();

        let result = create_feedback_with(&FailingEvaluator, &sink, request(None)).await;

        assert!(!result.success);
        assert!(result.feedback_id.is_none());
        assert!(sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_never_reports_success() {
        let evaluator = StubEvaluator(valid_object());

        let result = create_feedback_with(&evaluator, &FailingSink, request(None)).await;

        assert!(!result.success);
        assert!(result.feedback_id.is_none());
    }

    #[test]
    fn test_request_deserializes_without_feedback_id() {
        let json = r#"{
            "interview_id": "7f1f84a4-9a31-4f5a-a3fb-5ac63c7bb7b1",
            "user_id": "2e9b7c43-6f41-4e04-8f0f-24c2e7d2c6b4",
            "transcript": [{"role": "candidate", "content": "Hello"}]
        }"#;
        let request: CreateFeedbackRequest = serde_json::from_str(json).unwrap();
        assert!(request.feedback_id.is_none());
        assert_eq!(request.transcript.len(), 1);
    }

    #[test]
    fn test_failure_result_omits_feedback_id() {
        let result = CreateFeedbackResult {
            success: false,
            feedback_id: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"success": false}));
    }

    #[test]
    fn test_success_result_carries_feedback_id() {
        let id = Uuid::new_v4();
        let result = CreateFeedbackResult {
            success: true,
            feedback_id: Some(id),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["feedback_id"], serde_json::json!(id));
    }
}
