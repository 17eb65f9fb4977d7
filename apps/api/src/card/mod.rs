//! Interview Card — pure presentational view model plus minimal HTML render.
//!
//! Given an interview row and its (possibly absent) feedback association,
//! builds the labels and link the card displays. No I/O happens here; the
//! handler loads the feedback through the store accessor and resolves icons
//! before calling `build_card`.

pub mod icons;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::card::icons::TechIcon;
use crate::models::feedback::FeedbackRow;
use crate::models::interview::InterviewRow;

/// The card shows at most this many tech icons; extras are dropped.
const MAX_TECH_ICONS: usize = 3;

const NO_FEEDBACK_SUMMARY: &str =
    "You haven't taken the interview yet. Take it now to improve your skills.";
const SCORE_PLACEHOLDER: &str = "---";

/// Fully computed card view model, ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewCard {
    pub interview_id: Uuid,
    pub role: String,
    pub type_label: String,
    pub date_label: String,
    pub score_label: String,
    pub summary: String,
    pub tech_icons: Vec<TechIcon>,
    pub action_href: String,
    pub action_label: &'static str,
}

/// Builds the card view model from an interview and its feedback association.
pub fn build_card(
    interview: &InterviewRow,
    feedback: Option<&FeedbackRow>,
    tech_icons: Vec<TechIcon>,
) -> InterviewCard {
    let action_href = match feedback {
        Some(_) => format!("/interview/{}/feedback", interview.id),
        None => format!("/interview/{}", interview.id),
    };

    InterviewCard {
        interview_id: interview.id,
        role: interview.role.clone(),
        type_label: normalize_type_label(&interview.interview_type),
        date_label: format_card_date(
            feedback
                .map(|f| f.created_at.as_str())
                .or(non_empty(&interview.created_at)),
        ),
        score_label: score_label(feedback.map(|f| f.total_score)),
        summary: feedback
            .map(|f| f.final_assessment.clone())
            .unwrap_or_else(|| NO_FEEDBACK_SUMMARY.to_string()),
        tech_icons: tech_icons.into_iter().take(MAX_TECH_ICONS).collect(),
        action_label: if feedback.is_some() {
            "Check Feedback"
        } else {
            "View Interview"
        },
        action_href,
    }
}

/// Any interview type containing "mix" (case-insensitive) displays as "Mixed".
pub fn normalize_type_label(interview_type: &str) -> String {
    if interview_type.to_lowercase().contains("mix") {
        "Mixed".to_string()
    } else {
        interview_type.to_string()
    }
}

/// Formats an RFC 3339 timestamp-as-string as "Mon D, YYYY".
/// Missing or unparseable input falls back to the current time.
pub fn format_card_date(raw: Option<&str>) -> String {
    let instant = raw
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    instant.format("%b %-d, %Y").to_string()
}

/// "87/100" with a present score, "---/100" without.
pub fn score_label(total_score: Option<i32>) -> String {
    match total_score {
        Some(score) => format!("{score}/100"),
        None => format!("{SCORE_PLACEHOLDER}/100"),
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl InterviewCard {
    /// Renders the card as a standalone HTML fragment.
    /// Icons after the first carry the `stacked` class (overlapping layout).
    pub fn to_html(&self) -> String {
        let icons: String = self
            .tech_icons
            .iter()
            .enumerate()
            .map(|(i, icon)| {
                let class = if i >= 1 { "tech-icon stacked" } else { "tech-icon" };
                format!(
                    r#"<img class="{class}" src="{}" alt="{}" />"#,
                    escape_html(&icon.url),
                    escape_html(&icon.tech)
                )
            })
            .collect();

        format!(
            r#"<div class="interview-card">
  <span class="badge">{type_label}</span>
  <h3>{role} Interview</h3>
  <p class="date">{date}</p>
  <p class="score">{score}</p>
  <p class="summary">{summary}</p>
  <div class="tech-icons">{icons}</div>
  <a class="action" href="{href}">{label}</a>
</div>"#,
            type_label = escape_html(&self.type_label),
            role = escape_html(&self.role),
            date = escape_html(&self.date_label),
            score = escape_html(&self.score_label),
            summary = escape_html(&self.summary),
            icons = icons,
            href = escape_html(&self.action_href),
            label = self.action_label,
        )
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::types::Json;

    use crate::feedback::schema::{CategoryScore, FEEDBACK_CATEGORIES};

    fn interview(interview_type: &str, created_at: &str) -> InterviewRow {
        InterviewRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            role: "Backend Engineer".to_string(),
            interview_type: interview_type.to_string(),
            tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            finalized: true,
            created_at: created_at.to_string(),
        }
    }

    fn feedback_for(interview: &InterviewRow, total_score: i32) -> FeedbackRow {
        FeedbackRow {
            id: Uuid::new_v4(),
            interview_id: interview.id,
            user_id: interview.user_id,
            total_score,
            category_scores: Json(
                FEEDBACK_CATEGORIES
                    .iter()
                    .map(|name| CategoryScore {
                        name: name.to_string(),
                        score: total_score as u32,
                        comment: "ok".to_string(),
                    })
                    .collect(),
            ),
            strengths: vec![],
            areas_for_improvement: vec![],
            final_assessment: "Strong fundamentals, needs more depth on tradeoffs.".to_string(),
            created_at: "2025-03-05T10:30:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_type_containing_mix_renders_mixed() {
        assert_eq!(normalize_type_label("Technical Mix"), "Mixed");
        assert_eq!(normalize_type_label("MIXED"), "Mixed");
    }

    #[test]
    fn test_type_without_mix_renders_verbatim() {
        assert_eq!(normalize_type_label("Behavioral"), "Behavioral");
    }

    #[test]
    fn test_date_formats_as_mon_d_yyyy() {
        assert_eq!(
            format_card_date(Some("2025-03-05T10:30:00+00:00")),
            "Mar 5, 2025"
        );
        assert_eq!(
            format_card_date(Some("2024-12-25T00:00:00Z")),
            "Dec 25, 2024"
        );
    }

    #[test]
    fn test_missing_date_falls_back_to_today() {
        let today = Utc::now().format("%b %-d, %Y").to_string();
        assert_eq!(format_card_date(None), today);
    }

    #[test]
    fn test_card_without_feedback_shows_placeholders() {
        let row = interview("Behavioral", "");
        let card = build_card(&row, None, vec![]);

        assert_eq!(card.score_label, "---/100");
        assert_eq!(card.summary, NO_FEEDBACK_SUMMARY);
        assert_eq!(card.action_href, format!("/interview/{}", row.id));
        assert_eq!(card.action_label, "View Interview");
        // empty createdAt and no feedback means today's date
        let today = Utc::now().format("%b %-d, %Y").to_string();
        assert_eq!(card.date_label, today);
    }

    #[test]
    fn test_card_with_feedback_shows_score_and_feedback_link() {
        let row = interview("Technical", "2025-01-01T00:00:00Z");
        let feedback = feedback_for(&row, 87);
        let card = build_card(&row, Some(&feedback), vec![]);

        assert_eq!(card.score_label, "87/100");
        assert_eq!(card.summary, feedback.final_assessment);
        assert_eq!(card.action_href, format!("/interview/{}/feedback", row.id));
        assert_eq!(card.action_label, "Check Feedback");
        // feedback date wins over the interview date
        assert_eq!(card.date_label, "Mar 5, 2025");
    }

    #[test]
    fn test_tech_icons_capped_at_three() {
        let row = interview("Technical", "2025-01-01T00:00:00Z");
        let icons: Vec<TechIcon> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|t| TechIcon {
                tech: t.to_string(),
                url: format!("/icons/{t}.svg"),
            })
            .collect();
        let card = build_card(&row, None, icons);
        assert_eq!(card.tech_icons.len(), 3);
        assert_eq!(card.tech_icons[0].tech, "a");
    }

    #[test]
    fn test_html_stacks_icons_after_the_first() {
        let row = interview("Technical", "2025-01-01T00:00:00Z");
        let icons = vec![
            TechIcon {
                tech: "Rust".to_string(),
                url: "/icons/rust.svg".to_string(),
            },
            TechIcon {
                tech: "PostgreSQL".to_string(),
                url: "/icons/postgresql.svg".to_string(),
            },
        ];
        let html = build_card(&row, None, icons).to_html();
        assert_eq!(html.matches(r#"class="tech-icon""#).count(), 1);
        assert_eq!(html.matches(r#"class="tech-icon stacked""#).count(), 1);
    }

    #[test]
    fn test_html_escapes_role_text() {
        let mut row = interview("Technical", "2025-01-01T00:00:00Z");
        row.role = "C++ <Senior> Engineer".to_string();
        let html = build_card(&row, None, vec![]).to_html();
        assert!(html.contains("C++ &lt;Senior&gt; Engineer"));
        assert!(!html.contains("<Senior>"));
    }
}
