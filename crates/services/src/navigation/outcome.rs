use quiz_core::model::{CompletionSummary, QuestionId};

/// Why a navigation request did not move the quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// The gate for the current slide is closed.
    Gate,
    /// Gestures only navigate the intro slides.
    OutsideGestureRegion,
    /// The quiz is complete; only the call-to-action still navigates.
    Complete,
}

/// Result of feeding one event to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum NavigationOutcome {
    Advanced { from: usize, to: usize },
    /// Answer logged; the advance fires after the settle delay.
    AnswerRecorded { question_id: QuestionId },
    Jumped { to: usize },
    Completed(CompletionSummary),
    /// No sales slide exists; the host should leave the page.
    ExternalRedirect { url: Option<String> },
    Restarted,
    GateChanged { allowed: bool },
    Blocked(BlockReason),
    /// Dropped by the cool-down or an in-flight advance.
    Suppressed,
    /// Not applicable to the current state.
    Ignored,
    /// Deferred token from an earlier generation.
    Stale,
}

impl NavigationOutcome {
    /// The current slide changed as a result of this event.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(
            self,
            Self::Advanced { .. } | Self::Jumped { .. } | Self::Completed(_) | Self::Restarted
        )
    }
}
