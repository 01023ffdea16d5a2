//! Collaborators the navigation engine drives but does not own.

use quiz_core::GESTURE_SLIDE_COUNT;
use quiz_core::model::QuestionId;
use tokio::sync::watch;

/// Renders slides and indicators. The engine only tells it what to show.
pub trait PresentationAdapter: Send {
    fn hide_all(&mut self);
    fn show_slide(&mut self, index: usize);
    fn set_progress_percent(&mut self, percent: f64);
    fn set_progress_visible(&mut self, visible: bool);
    fn set_gate_indicator(&mut self, enabled: bool, label: &str);

    /// Whether the slide's content region currently sits at its bottom.
    /// Content that cannot scroll reports `true`.
    fn scroll_at_bottom(&self, _index: usize) -> bool {
        true
    }
}

/// Confetti, click sounds and similar; purely side effects.
pub trait RewardEffectsPort: Send {
    fn answer_selected(&mut self, question_id: QuestionId);
    fn quiz_completed(&mut self);
}

/// Presentation that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresentation;

impl PresentationAdapter for NoopPresentation {
    fn hide_all(&mut self) {}
    fn show_slide(&mut self, _index: usize) {}
    fn set_progress_percent(&mut self, _percent: f64) {}
    fn set_progress_visible(&mut self, _visible: bool) {}
    fn set_gate_indicator(&mut self, _enabled: bool, _label: &str) {}
}

/// Decides whether leaving the page needs a confirmation, from the engine's
/// published slide index.
#[derive(Clone, Debug)]
pub struct LeaveGuard {
    index: watch::Receiver<usize>,
}

impl LeaveGuard {
    #[must_use]
    pub fn new(index: watch::Receiver<usize>) -> Self {
        Self { index }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        *self.index.borrow()
    }

    /// No prompt on the intro slides.
    #[must_use]
    pub fn should_confirm_leave(&self) -> bool {
        self.current_index() >= GESTURE_SLIDE_COUNT
    }

    /// Wait for the next index change.
    ///
    /// Returns `None` once the engine is gone.
    pub async fn changed(&mut self) -> Option<usize> {
        self.index.changed().await.ok()?;
        Some(*self.index.borrow_and_update())
    }
}
