// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interview session, question, answer, and summary contracts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::validation::DEFAULT_QUESTION_COUNT;

/// Requested interview difficulty.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Mixed,
}

/// Question categories produced by the upstream generator.
///
/// Unrecognized values deserialize as [`QuestionCategory::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionCategory {
    Technical,
    Behavioral,
    Project,
    SystemDesign,
    Coding,
    General,
    /// A category this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Body of `POST /interview/start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewStartRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<Uuid>,
    #[serde(default = "default_question_count")]
    pub question_count: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_areas: Option<Vec<String>>,
}

impl Default for InterviewStartRequest {
    fn default() -> Self {
        Self {
            resume_id: None,
            question_count: DEFAULT_QUESTION_COUNT,
            difficulty: Difficulty::default(),
            focus_areas: None,
        }
    }
}

fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}

/// One interview attempt as reported by the upstream service.
///
/// Terminal once `completed_at` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub resume_id: Option<String>,
    pub difficulty: String,
    pub question_count: u32,
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub feedback_summary: Option<String>,
    #[serde(default)]
    pub score_breakdown: Option<BTreeMap<String, f64>>,
}

impl InterviewSession {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// One question instance within a session.
///
/// Some upstream versions only send the id and text, so the remaining fields
/// default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "id")]
    pub question_id: String,
    pub question_text: String,
    #[serde(default)]
    pub category: Option<QuestionCategory>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub order_index: u32,
}

/// Answer text plus optional elapsed time. Never persisted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub answer_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken_seconds: Option<u32>,
}

/// Body the browser posts to the BFF answer route; the question id travels
/// in the body and moves into the upstream path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEnvelope {
    pub question_id: String,
    #[serde(flatten)]
    pub answer: AnswerSubmission,
}

/// Evaluation of a single answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionFeedback {
    pub question_id: String,
    pub evaluation_score: f64,
    pub feedback_comment: String,
}

/// Final result of a completed interview. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub session_id: String,
    pub final_score: f64,
    pub feedback_summary: String,
    #[serde(default)]
    pub question_feedback: Vec<QuestionFeedback>,
    #[serde(default)]
    pub score_breakdown: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub weaknesses: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        assert_eq!("mixed".parse::<Difficulty>().unwrap(), Difficulty::Mixed);
    }

    #[test]
    fn category_wire_format_is_snake_case() {
        let parsed: QuestionCategory = serde_json::from_str("\"system_design\"").unwrap();
        assert_eq!(parsed, QuestionCategory::SystemDesign);
        assert_eq!(QuestionCategory::SystemDesign.to_string(), "system_design");
    }

    #[test]
    fn unrecognized_category_falls_back_to_unknown() {
        let q: Question = serde_json::from_str(
            r#"{"question_id":"q-2","question_text":"Tell me about yourself.","category":"culture_fit"}"#,
        )
        .unwrap();
        assert_eq!(q.category, Some(QuestionCategory::Unknown));

        let q: Question = serde_json::from_str(
            r#"{"question_id":"q-3","question_text":"Design a cache.","category":"system_design"}"#,
        )
        .unwrap();
        assert_eq!(q.category, Some(QuestionCategory::SystemDesign));
    }

    #[test]
    fn start_request_fills_defaults() {
        let req: InterviewStartRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, InterviewStartRequest::default());
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("resume_id").is_none());
        assert_eq!(json["question_count"], 12);
        assert_eq!(json["difficulty"], "mixed");
    }

    #[test]
    fn question_accepts_minimal_upstream_shape() {
        let q: Question =
            serde_json::from_str(r#"{"question_id":"q-1","question_text":"Why Rust?"}"#).unwrap();
        assert_eq!(q.question_id, "q-1");
        assert_eq!(q.order_index, 0);
        assert!(q.category.is_none());
    }

    #[test]
    fn answer_envelope_splits_question_id_from_body() {
        let env: AnswerEnvelope = serde_json::from_str(
            r#"{"question_id":"q-9","answer_text":"Ownership","time_taken_seconds":42}"#,
        )
        .unwrap();
        assert_eq!(env.question_id, "q-9");
        let body = serde_json::to_value(&env.answer).unwrap();
        assert_eq!(body, serde_json::json!({"answer_text":"Ownership","time_taken_seconds":42}));
    }

    #[test]
    fn session_completion_flag() {
        let mut session: InterviewSession = serde_json::from_value(serde_json::json!({
            "id": "s-1",
            "user_id": "u-1",
            "difficulty": "mixed",
            "question_count": 5,
            "started_at": "2026-01-01T10:00:00Z"
        }))
        .unwrap();
        assert!(!session.is_completed());
        session.completed_at = Some("2026-01-01T10:30:00Z".into());
        assert!(session.is_completed());
    }
}
