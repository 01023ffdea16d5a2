//! Recording port implementations for headless hosts and tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use quiz_core::SlideRegistry;
use quiz_core::model::{QuestionId, QuizSettings, SlideDraft};
use quiz_core::time::fixed_clock;

use crate::navigation::{EnginePorts, InputEvent, NavigationEngine, NavigationOutcome};
use crate::ports::{PresentationAdapter, RewardEffectsPort};
use crate::scheduler::{DeferredAction, ManualTimer};

#[derive(Clone, Debug, PartialEq)]
pub enum PresentationCall {
    HideAll,
    ShowSlide(usize),
    ProgressPercent(f64),
    ProgressVisible(bool),
    GateIndicator { enabled: bool, label: String },
}

/// Presentation that logs every call. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresentation {
    calls: Arc<Mutex<Vec<PresentationCall>>>,
    scrollable: Arc<Mutex<HashSet<usize>>>,
}

impl RecordingPresentation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slide `index` opens with content below the fold.
    pub fn set_scrollable(&self, index: usize) {
        if let Ok(mut set) = self.scrollable.lock() {
            set.insert(index);
        }
    }

    #[must_use]
    pub fn calls(&self) -> Vec<PresentationCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Indices passed to `show_slide`, in order.
    #[must_use]
    pub fn shown(&self) -> Vec<usize> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PresentationCall::ShowSlide(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_percent(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|c| match c {
            PresentationCall::ProgressPercent(p) => Some(p),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_progress_visible(&self) -> Option<bool> {
        self.calls().into_iter().rev().find_map(|c| match c {
            PresentationCall::ProgressVisible(v) => Some(v),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_gate(&self) -> Option<(bool, String)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            PresentationCall::GateIndicator { enabled, label } => Some((enabled, label)),
            _ => None,
        })
    }

    fn push(&self, call: PresentationCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl PresentationAdapter for RecordingPresentation {
    fn hide_all(&mut self) {
        self.push(PresentationCall::HideAll);
    }

    fn show_slide(&mut self, index: usize) {
        self.push(PresentationCall::ShowSlide(index));
    }

    fn set_progress_percent(&mut self, percent: f64) {
        self.push(PresentationCall::ProgressPercent(percent));
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.push(PresentationCall::ProgressVisible(visible));
    }

    fn set_gate_indicator(&mut self, enabled: bool, label: &str) {
        self.push(PresentationCall::GateIndicator {
            enabled,
            label: label.to_string(),
        });
    }

    fn scroll_at_bottom(&self, index: usize) -> bool {
        self.scrollable
            .lock()
            .map(|set| !set.contains(&index))
            .unwrap_or(true)
    }
}

/// Counts reward effects. Clones share the same counters.
#[derive(Clone, Debug, Default)]
pub struct RecordingRewards {
    answers: Arc<Mutex<Vec<QuestionId>>>,
    completions: Arc<Mutex<usize>>,
}

impl RecordingRewards {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn answers(&self) -> Vec<QuestionId> {
        self.answers.lock().map(|a| a.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn completions(&self) -> usize {
        self.completions.lock().map(|c| *c).unwrap_or(0)
    }
}

impl RewardEffectsPort for RecordingRewards {
    fn answer_selected(&mut self, question_id: QuestionId) {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push(question_id);
        }
    }

    fn quiz_completed(&mut self) {
        if let Ok(mut count) = self.completions.lock() {
            *count += 1;
        }
    }
}

/// An engine wired to recording ports, a manual timer and a fixed clock.
pub struct Harness {
    pub engine: NavigationEngine,
    pub presentation: RecordingPresentation,
    pub timer: ManualTimer,
    pub rewards: RecordingRewards,
}

impl Harness {
    /// Build a harness without starting the quiz.
    ///
    /// # Panics
    ///
    /// Panics if `drafts` do not form a valid quiz.
    #[must_use]
    pub fn new(drafts: Vec<SlideDraft>) -> Self {
        Self::with_settings(drafts, QuizSettings::default())
    }

    /// # Panics
    ///
    /// Panics if `drafts` do not form a valid quiz.
    #[must_use]
    pub fn with_settings(drafts: Vec<SlideDraft>, settings: QuizSettings) -> Self {
        let registry = match SlideRegistry::from_drafts(drafts) {
            Ok(registry) => registry,
            Err(err) => panic!("invalid quiz fixture: {err}"),
        };
        let presentation = RecordingPresentation::new();
        let timer = ManualTimer::new();
        let rewards = RecordingRewards::new();
        let ports = EnginePorts::new(presentation.clone(), timer.clone())
            .with_rewards(rewards.clone());
        Self {
            engine: NavigationEngine::new(registry, settings, fixed_clock(), ports),
            presentation,
            timer,
            rewards,
        }
    }

    /// Build a harness and start the quiz on slide 0.
    #[must_use]
    pub fn started(drafts: Vec<SlideDraft>) -> Self {
        let mut harness = Self::new(drafts);
        harness.engine.start();
        harness
    }

    /// Upward touch swipe well past the default threshold.
    pub fn swipe(&mut self) -> NavigationOutcome {
        self.engine.handle(InputEvent::TouchStart { y: 400.0 });
        self.engine.handle(InputEvent::TouchEnd { y: 300.0 })
    }

    pub fn answer(&mut self, option: &str) -> NavigationOutcome {
        self.engine.handle(InputEvent::OptionClicked {
            label: option.to_string(),
        })
    }

    /// Fire the oldest pending token for `action`; `Ignored` if none is queued.
    pub fn fire(&mut self, action: DeferredAction) -> NavigationOutcome {
        match self.timer.take(action) {
            Some(token) => self.engine.handle(InputEvent::TimerFired(token)),
            None => NavigationOutcome::Ignored,
        }
    }

    pub fn end_cooldown(&mut self) -> NavigationOutcome {
        self.fire(DeferredAction::EndCooldown)
    }
}
