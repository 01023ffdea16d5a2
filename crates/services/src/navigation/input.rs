use quiz_core::ScrollMetrics;
use quiz_core::model::QuizSettings;

use crate::scheduler::DeferredToken;

/// Raw events a host forwards to the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    TouchStart { y: f64 },
    TouchEnd { y: f64 },
    Wheel { delta_y: f64 },
    ContentScrolled(ScrollMetrics),
    /// Bottom-reached signal when the host measures scroll position itself.
    ContentAtBottom(bool),
    OptionClicked { label: String },
    ContinueClicked,
    CtaClicked,
    RestartClicked,
    TimerFired(DeferredToken),
}

/// Forward-navigation requests after gesture recognition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    SwipeGesture,
    ScrollGesture,
    ContinueClick,
    OptionClick { option: String },
    CtaClick,
}

impl Trigger {
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::SwipeGesture | Self::ScrollGesture)
    }
}

/// Turns touch and wheel deltas into gesture triggers.
#[derive(Clone, Debug, Default)]
pub struct GestureRecognizer {
    touch_start_y: Option<f64>,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, y: f64) {
        self.touch_start_y = Some(y);
    }

    /// Upward swipe longer than the threshold.
    pub fn touch_end(&mut self, y: f64, settings: &QuizSettings) -> Option<Trigger> {
        let start = self.touch_start_y.take()?;
        (start - y > settings.swipe_threshold_px()).then_some(Trigger::SwipeGesture)
    }

    /// Wheel movement past the threshold in the forward direction (negative delta).
    #[must_use]
    pub fn wheel(&self, delta_y: f64, settings: &QuizSettings) -> Option<Trigger> {
        (delta_y < -settings.wheel_threshold()).then_some(Trigger::ScrollGesture)
    }

    pub fn reset(&mut self) {
        self.touch_start_y = None;
    }
}
