use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Recorded outcome of answering one question slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected_option: String,
    pub time_spent_secs: f64,
    pub answered_at: DateTime<Utc>,
}

impl Response {
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        question_text: impl Into<String>,
        selected_option: impl Into<String>,
        time_spent_secs: f64,
        answered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            question_id,
            question_text: question_text.into(),
            selected_option: selected_option.into(),
            time_spent_secs: time_spent_secs.max(0.0),
            answered_at,
        }
    }
}

/// Aggregate produced once every question has been answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total_secs: f64,
    pub question_count: usize,
    pub responses: Vec<Response>,
}

impl CompletionSummary {
    /// Sum of per-question answer times.
    #[must_use]
    pub fn answering_secs(&self) -> f64 {
        self.responses.iter().map(|r| r.time_spent_secs).sum()
    }
}
