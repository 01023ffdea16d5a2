//! Forward-navigation gating for the current slide.
//!
//! Two policies are unified here: a `no-swipe` slide is closed for its whole
//! visit, and a `requires-read` slide opens once its content has been
//! scrolled to the bottom and stays open until the slide is left.

use crate::model::{QuizSettings, Slide};

/// Scroll position of a slide's content region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub client_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    /// Content taller than its viewport by more than `slack`.
    #[must_use]
    pub fn is_scrollable(&self, slack: f64) -> bool {
        self.scroll_height > self.client_height + slack
    }

    #[must_use]
    pub fn is_at_bottom(&self, tolerance: f64) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - tolerance
    }

    /// Bottom-reached signal as the gate consumes it; content that does not
    /// scroll counts as read.
    #[must_use]
    pub fn reached_bottom(&self, settings: &QuizSettings) -> bool {
        !self.is_scrollable(settings.scrollable_slack_px())
            || self.is_at_bottom(settings.scroll_bottom_tolerance_px())
    }
}

/// Indicator state shown next to the swipe hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Open,
    AwaitingScroll,
    Disabled,
}

impl GateStatus {
    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    #[must_use]
    pub fn label(self, settings: &QuizSettings) -> &str {
        match self {
            Self::Open => settings.gate_label_open(),
            Self::AwaitingScroll => settings.gate_label_locked(),
            Self::Disabled => "",
        }
    }
}

/// Per-visit gate state. `enter` starts a visit, `observe_scroll` feeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateController {
    status: GateStatus,
}

impl Default for GateController {
    fn default() -> Self {
        Self {
            status: GateStatus::Open,
        }
    }
}

impl GateController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stateless policy: is forward navigation allowed for `slide` right now?
    #[must_use]
    pub fn evaluate(slide: &Slide, scroll_at_bottom: bool) -> bool {
        Self::status_for(slide, scroll_at_bottom).is_open()
    }

    #[must_use]
    pub fn status_for(slide: &Slide, scroll_at_bottom: bool) -> GateStatus {
        if slide.no_swipe() {
            GateStatus::Disabled
        } else if slide.requires_read() && !scroll_at_bottom {
            GateStatus::AwaitingScroll
        } else {
            GateStatus::Open
        }
    }

    /// Start a new visit of `slide`.
    pub fn enter(&mut self, slide: &Slide, scroll_at_bottom: bool) -> GateStatus {
        self.status = Self::status_for(slide, scroll_at_bottom);
        self.status
    }

    /// Re-evaluate on a scroll event. Returns the new status when it changed.
    ///
    /// An open gate never closes again during the same visit.
    pub fn observe_scroll(&mut self, slide: &Slide, scroll_at_bottom: bool) -> Option<GateStatus> {
        if self.status != GateStatus::AwaitingScroll {
            return None;
        }
        let next = Self::status_for(slide, scroll_at_bottom);
        if next == self.status {
            return None;
        }
        self.status = next;
        Some(next)
    }

    #[must_use]
    pub fn status(&self) -> GateStatus {
        self.status
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.status.is_open()
    }
}
