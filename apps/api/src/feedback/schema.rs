//! Structured-output schema for interview feedback.
//!
//! The model wire contract is camelCase; stored rows reuse `CategoryScore`
//! inside a JSONB column so read and write paths share one shape.

use serde::{Deserialize, Serialize};

/// The five fixed evaluation categories. Every feedback document carries
/// exactly these — no more, no fewer.
pub const FEEDBACK_CATEGORIES: [&str; 5] = [
    "Communication Skills",
    "Technical Knowledge",
    "Problem-Solving",
    "Cultural & Role Fit",
    "Confidence & Clarity",
];

/// A single named sub-score with free-text comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: u32,
    pub comment: String,
}

/// Full structured output of the feedback evaluation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackObject {
    pub total_score: u32,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

impl FeedbackObject {
    /// Checks the fixed-schema invariants: totalScore in [0,100] and exactly
    /// the five fixed categories, each scored in [0,100].
    pub fn validate(&self) -> Result<(), String> {
        if self.total_score > 100 {
            return Err(format!("totalScore {} out of range", self.total_score));
        }
        check_category_invariant(&self.category_scores)
    }
}

/// Verifies a category list contains exactly the five fixed categories with
/// in-range scores. Shared by model-output validation and the store read path.
pub fn check_category_invariant(scores: &[CategoryScore]) -> Result<(), String> {
    if scores.len() != FEEDBACK_CATEGORIES.len() {
        return Err(format!(
            "expected {} category scores, got {}",
            FEEDBACK_CATEGORIES.len(),
            scores.len()
        ));
    }
    for name in FEEDBACK_CATEGORIES {
        if !scores.iter().any(|c| c.name == name) {
            return Err(format!("missing category '{name}'"));
        }
    }
    for c in scores {
        if c.score > 100 {
            return Err(format!("category '{}' score {} out of range", c.name, c.score));
        }
    }
    Ok(())
}
