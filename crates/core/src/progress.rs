use chrono::{DateTime, Utc};

use crate::model::{CompletionSummary, QuestionId, Response};
use crate::registry::SlideRegistry;
use crate::time::seconds_between;

/// Append-only log of answered questions for one quiz attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    question_count: usize,
    responses: Vec<Response>,
    started_at: DateTime<Utc>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(question_count: usize, started_at: DateTime<Utc>) -> Self {
        Self {
            question_count,
            responses: Vec::new(),
            started_at,
        }
    }

    #[must_use]
    pub fn for_registry(registry: &SlideRegistry, started_at: DateTime<Utc>) -> Self {
        Self::new(registry.question_count(), started_at)
    }

    /// Append a response and return it.
    pub fn record_response(
        &mut self,
        question_id: QuestionId,
        question_text: impl Into<String>,
        selected_option: impl Into<String>,
        time_spent_secs: f64,
        answered_at: DateTime<Utc>,
    ) -> &Response {
        self.responses.push(Response::new(
            question_id,
            question_text,
            selected_option,
            time_spent_secs,
            answered_at,
        ));
        &self.responses[self.responses.len() - 1]
    }

    /// Replace the log with previously saved responses.
    ///
    /// Responses to questions `registry` does not contain, and repeat answers
    /// to the same question, are dropped. Returns how many were dropped.
    pub fn restore(&mut self, registry: &SlideRegistry, responses: Vec<Response>) -> usize {
        let offered = responses.len();
        self.responses.clear();
        for response in responses {
            if registry.index_of_question(response.question_id).is_some()
                && !self.has_answered(response.question_id)
            {
                self.responses.push(response);
            }
        }
        offered - self.responses.len()
    }

    /// Clear the log and restart the attempt clock.
    pub fn reset(&mut self, started_at: DateTime<Utc>) {
        self.responses.clear();
        self.started_at = started_at;
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// `answered * 100 / questions`, capped at 100; `0` without questions.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_complete(&self) -> f64 {
        if self.question_count == 0 {
            return 0.0;
        }
        let pct = self.answered_count() as f64 * 100.0 / self.question_count as f64;
        pct.min(100.0)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.question_count > 0 && self.answered_count() >= self.question_count
    }

    #[must_use]
    pub fn has_answered(&self, question_id: QuestionId) -> bool {
        self.responses.iter().any(|r| r.question_id == question_id)
    }

    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completion_summary(&self, completed_at: DateTime<Utc>) -> CompletionSummary {
        CompletionSummary {
            started_at: self.started_at,
            completed_at,
            total_secs: seconds_between(self.started_at, completed_at),
            question_count: self.question_count,
            responses: self.responses.clone(),
        }
    }
}
