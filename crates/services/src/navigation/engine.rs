use std::fmt;

use log::{debug, info, warn};
use quiz_core::model::{QuizSettings, Response, Slide};
use quiz_core::time::seconds_between;
use quiz_core::{
    Clock, ConfigurationError, GESTURE_SLIDE_COUNT, GateController, GateStatus,
    MalformedResponseError, ProgressTracker, SlideRegistry,
};
use tokio::sync::watch;

use super::input::{GestureRecognizer, InputEvent, Trigger};
use super::outcome::{BlockReason, NavigationOutcome};
use super::state::NavigationState;
use crate::ports::{LeaveGuard, PresentationAdapter, RewardEffectsPort};
use crate::scheduler::{DeferredAction, DeferredToken, TimerService};

//
// ─── PORTS ─────────────────────────────────────────────────────────────────────
//

/// Collaborators the engine calls into.
pub struct EnginePorts {
    pub presentation: Box<dyn PresentationAdapter>,
    pub timer: Box<dyn TimerService>,
    pub rewards: Option<Box<dyn RewardEffectsPort>>,
}

impl EnginePorts {
    #[must_use]
    pub fn new(
        presentation: impl PresentationAdapter + 'static,
        timer: impl TimerService + 'static,
    ) -> Self {
        Self {
            presentation: Box::new(presentation),
            timer: Box::new(timer),
            rewards: None,
        }
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: impl RewardEffectsPort + 'static) -> Self {
        self.rewards = Some(Box::new(rewards));
        self
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Slide navigation state machine for one quiz.
///
/// All state lives here; hosts feed [`InputEvent`]s through [`Self::handle`]
/// and render whatever the engine pushes to its [`PresentationAdapter`].
/// The current index only moves forward, except on restart.
pub struct NavigationEngine {
    registry: SlideRegistry,
    settings: QuizSettings,
    clock: Clock,
    progress: ProgressTracker,
    gate: GateController,
    gestures: GestureRecognizer,
    state: NavigationState,
    ports: EnginePorts,
    index_tx: watch::Sender<usize>,
}

impl NavigationEngine {
    /// Build an engine. Call [`Self::start`] or [`Self::restore`] before
    /// feeding events.
    #[must_use]
    pub fn new(
        registry: SlideRegistry,
        settings: QuizSettings,
        clock: Clock,
        ports: EnginePorts,
    ) -> Self {
        let now = clock.now();
        let (index_tx, _) = watch::channel(0);
        Self {
            progress: ProgressTracker::for_registry(&registry, now),
            registry,
            settings,
            clock,
            gate: GateController::new(),
            gestures: GestureRecognizer::new(),
            state: NavigationState::fresh(0, now),
            ports,
            index_tx,
        }
    }

    // ─── lifecycle ───────────────────────────────────────────────────────────

    /// Begin a fresh attempt on the first slide.
    pub fn start(&mut self) {
        self.reset_attempt();
        info!(
            "quiz started: {} slides, {} questions",
            self.registry.slide_count(),
            self.registry.question_count()
        );
        self.enter_slide(0);
    }

    /// Drop the current attempt, including any in-flight deferred advance.
    pub fn restart(&mut self) -> NavigationOutcome {
        self.reset_attempt();
        info!("quiz restarted (generation {})", self.state.generation);
        self.enter_slide(0);
        NavigationOutcome::Restarted
    }

    /// Resume a saved attempt at `index` with its recorded responses.
    ///
    /// Returns `Jumped { to: index }`, or `Completed` when the saved responses
    /// already answer every question.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::SlideOutOfRange` if `index` is not a slide
    /// of this quiz; the engine is left untouched in that case.
    pub fn restore(
        &mut self,
        index: usize,
        responses: Vec<Response>,
    ) -> Result<NavigationOutcome, ConfigurationError> {
        self.registry.slide_at(index)?;
        self.reset_attempt();
        let dropped = self.progress.restore(&self.registry, responses);
        if dropped > 0 {
            warn!("dropped {dropped} saved answers that do not match this quiz");
        }
        info!(
            "quiz restored at slide {index} with {} answers",
            self.progress.answered_count()
        );
        if self.progress.is_complete() {
            self.state.current_index = index;
            return Ok(self.complete());
        }
        self.enter_slide(index);
        Ok(NavigationOutcome::Jumped { to: index })
    }

    fn reset_attempt(&mut self) {
        let now = self.clock.now();
        self.state = NavigationState::fresh(self.state.generation + 1, now);
        self.progress.reset(now);
        self.gestures.reset();
    }

    // ─── events ──────────────────────────────────────────────────────────────

    /// Dispatch one host event.
    pub fn handle(&mut self, event: InputEvent) -> NavigationOutcome {
        match event {
            InputEvent::TouchStart { y } => {
                self.gestures.touch_start(y);
                NavigationOutcome::Ignored
            }
            InputEvent::TouchEnd { y } => match self.gestures.touch_end(y, &self.settings) {
                Some(trigger) => self.request_advance(trigger),
                None => NavigationOutcome::Ignored,
            },
            InputEvent::Wheel { delta_y } => match self.gestures.wheel(delta_y, &self.settings) {
                Some(trigger) => self.request_advance(trigger),
                None => NavigationOutcome::Ignored,
            },
            InputEvent::ContentScrolled(metrics) => {
                let at_bottom = metrics.reached_bottom(&self.settings);
                self.on_scroll(at_bottom)
            }
            InputEvent::ContentAtBottom(at_bottom) => self.on_scroll(at_bottom),
            InputEvent::OptionClicked { label } => {
                self.request_advance(Trigger::OptionClick { option: label })
            }
            InputEvent::ContinueClicked => self.request_advance(Trigger::ContinueClick),
            InputEvent::CtaClicked => self.request_advance(Trigger::CtaClick),
            InputEvent::RestartClicked => self.restart(),
            InputEvent::TimerFired(token) => self.on_deferred(token),
        }
    }

    /// Ask to move forward.
    pub fn request_advance(&mut self, trigger: Trigger) -> NavigationOutcome {
        if self.state.complete && trigger != Trigger::CtaClick {
            return NavigationOutcome::Blocked(BlockReason::Complete);
        }

        match trigger {
            Trigger::SwipeGesture | Trigger::ScrollGesture => self.gesture_advance(),
            Trigger::OptionClick { option } => self.answer(option),
            Trigger::ContinueClick => {
                if self.state.pending_advance {
                    return NavigationOutcome::Suppressed;
                }
                self.advance_to(self.state.current_index + 1)
            }
            Trigger::CtaClick => {
                if self.state.pending_advance {
                    return NavigationOutcome::Suppressed;
                }
                self.call_to_action()
            }
        }
    }

    /// Feed the bottom-reached signal for the current slide's content.
    pub fn on_scroll(&mut self, at_bottom: bool) -> NavigationOutcome {
        let slide = self.registry.slide_clamped(self.state.current_index);
        match self.gate.observe_scroll(slide, at_bottom) {
            Some(status) => {
                debug!(
                    "gate on slide {} changed to {status:?}",
                    self.state.current_index
                );
                self.apply_gate(status);
                NavigationOutcome::GateChanged {
                    allowed: status.is_open(),
                }
            }
            None => NavigationOutcome::Ignored,
        }
    }

    /// Run a deferred action handed out earlier through the timer service.
    pub fn on_deferred(&mut self, token: DeferredToken) -> NavigationOutcome {
        if token.generation != self.state.generation {
            debug!(
                "dropping stale {:?} from generation {} (now {})",
                token.action, token.generation, self.state.generation
            );
            return NavigationOutcome::Stale;
        }

        match token.action {
            DeferredAction::EndCooldown => {
                self.state.cooling_down = false;
                NavigationOutcome::Ignored
            }
            DeferredAction::AdvanceAfterAnswer => {
                if !self.state.pending_advance {
                    return NavigationOutcome::Ignored;
                }
                self.state.pending_advance = false;
                if self.progress.is_complete() {
                    self.complete()
                } else {
                    self.advance_to(self.state.current_index + 1)
                }
            }
        }
    }

    fn gesture_advance(&mut self) -> NavigationOutcome {
        if self.state.pending_advance || self.state.cooling_down {
            debug!("gesture suppressed on slide {}", self.state.current_index);
            return NavigationOutcome::Suppressed;
        }
        self.state.cooling_down = true;
        let token = self.token(DeferredAction::EndCooldown);
        self.ports
            .timer
            .schedule(self.settings.gesture_cooldown(), token);

        if self.state.current_index >= GESTURE_SLIDE_COUNT {
            return NavigationOutcome::Blocked(BlockReason::OutsideGestureRegion);
        }
        if !self.state.swipe_enabled {
            return NavigationOutcome::Blocked(BlockReason::Gate);
        }
        self.advance_to(self.state.current_index + 1)
    }

    fn answer(&mut self, option: String) -> NavigationOutcome {
        if self.state.pending_advance {
            return NavigationOutcome::Suppressed;
        }

        let slide = self.registry.slide_clamped(self.state.current_index);
        let Some(question_id) = slide.question_id() else {
            let err = MalformedResponseError::NoQuestionId {
                index: slide.index(),
                kind: slide.kind(),
            };
            warn!("ignoring answer: {err}");
            return NavigationOutcome::Ignored;
        };
        if option.trim().is_empty() {
            warn!(
                "ignoring answer: {}",
                MalformedResponseError::EmptyOption { question_id }
            );
            return NavigationOutcome::Ignored;
        }
        let question_text = slide.question_text().to_string();

        let now = self.clock.now();
        if self.progress.has_answered(question_id) {
            debug!("question {question_id} already answered; advancing without recording");
        } else {
            let spent = seconds_between(self.state.slide_entered_at, now);
            let response =
                self.progress
                    .record_response(question_id, question_text, option, spent, now);
            debug!(
                "answer {:?} to question {question_id} after {:.1}s",
                response.selected_option, response.time_spent_secs
            );
        }

        if let Some(rewards) = self.ports.rewards.as_mut() {
            rewards.answer_selected(question_id);
        }

        self.state.pending_advance = true;
        let token = self.token(DeferredAction::AdvanceAfterAnswer);
        self.ports.timer.schedule(self.settings.settle_delay(), token);

        NavigationOutcome::AnswerRecorded { question_id }
    }

    fn call_to_action(&mut self) -> NavigationOutcome {
        match self.registry.sales_index() {
            Some(to) if to < self.state.current_index => {
                debug!("sales slide {to} is behind slide {}", self.state.current_index);
                NavigationOutcome::Ignored
            }
            Some(to) => {
                self.enter_slide(to);
                NavigationOutcome::Jumped { to }
            }
            None => {
                info!("no sales slide; falling back to external redirect");
                NavigationOutcome::ExternalRedirect {
                    url: self.settings.sales_redirect_url().map(str::to_string),
                }
            }
        }
    }

    fn complete(&mut self) -> NavigationOutcome {
        self.state.complete = true;
        self.ports.presentation.set_progress_percent(100.0);
        let target = self.registry.final_index().max(self.state.current_index);
        self.enter_slide(target);

        if let Some(rewards) = self.ports.rewards.as_mut() {
            rewards.quiz_completed();
        }

        let summary = self.progress.completion_summary(self.clock.now());
        info!(
            "quiz completed: {} answers in {:.1}s",
            summary.responses.len(),
            summary.total_secs
        );
        NavigationOutcome::Completed(summary)
    }

    /// Move to `target`, clamping past-the-end targets to the terminal slide.
    fn advance_to(&mut self, target: usize) -> NavigationOutcome {
        let from = self.state.current_index;
        let to = if target < self.registry.slide_count() {
            target
        } else {
            self.registry.final_index().max(from)
        };
        if to == from {
            return NavigationOutcome::Ignored;
        }
        self.enter_slide(to);
        NavigationOutcome::Advanced { from, to }
    }

    fn enter_slide(&mut self, index: usize) {
        let slide = self.registry.slide_clamped(index);
        let index = slide.index();
        let at_bottom = self.ports.presentation.scroll_at_bottom(index);
        let status = self.gate.enter(slide, at_bottom);
        let shows_progress = slide.kind().shows_progress();
        debug!("entering slide {index} ({}), gate {status:?}", slide.kind());

        self.state.current_index = index;
        self.state.slide_entered_at = self.clock.now();

        let percent = if self.state.complete {
            100.0
        } else {
            self.progress.percent_complete()
        };
        let presentation = &mut self.ports.presentation;
        presentation.hide_all();
        presentation.show_slide(index);
        presentation.set_progress_visible(shows_progress);
        presentation.set_progress_percent(percent);

        self.apply_gate(status);
        self.index_tx.send_replace(index);
    }

    fn apply_gate(&mut self, status: GateStatus) {
        self.state.swipe_enabled = status.is_open();
        self.ports
            .presentation
            .set_gate_indicator(status.is_open(), status.label(&self.settings));
    }

    fn token(&self, action: DeferredAction) -> DeferredToken {
        DeferredToken {
            generation: self.state.generation,
            action,
        }
    }

    // ─── queries ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    #[must_use]
    pub fn current_slide(&self) -> &Slide {
        self.registry.slide_clamped(self.state.current_index)
    }

    #[must_use]
    pub fn swipe_enabled(&self) -> bool {
        self.state.swipe_enabled
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    #[must_use]
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    #[must_use]
    pub fn gate_status(&self) -> GateStatus {
        self.gate.status()
    }

    #[must_use]
    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Slide a resumed attempt should open at: the target of an in-flight
    /// answer advance, else the current slide.
    #[must_use]
    pub fn resume_index(&self) -> usize {
        if !self.state.pending_advance {
            return self.state.current_index;
        }
        if self.progress.is_complete() {
            return self.registry.final_index();
        }
        (self.state.current_index + 1).min(self.registry.slide_count() - 1)
    }

    /// Observe the current slide index.
    #[must_use]
    pub fn subscribe_index(&self) -> watch::Receiver<usize> {
        self.index_tx.subscribe()
    }

    #[must_use]
    pub fn leave_guard(&self) -> LeaveGuard {
        LeaveGuard::new(self.subscribe_index())
    }
}

impl fmt::Debug for NavigationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationEngine")
            .field("slides", &self.registry.slide_count())
            .field("state", &self.state)
            .field("answered", &self.progress.answered_count())
            .field("gate", &self.gate.status())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, PresentationCall};
    use chrono::Duration as ChronoDuration;
    use quiz_core::model::{QuestionId, SlideDraft, SlideKind};

    fn standard() -> Vec<SlideDraft> {
        vec![
            SlideDraft::new(SlideKind::Welcome),
            SlideDraft::new(SlideKind::Story),
            SlideDraft::question(1, "How often?", &["Never", "Often"]),
            SlideDraft::question(2, "How long?", &["Short", "Long"]),
            SlideDraft::new(SlideKind::Final),
            SlideDraft::new(SlideKind::Sales),
        ]
    }

    #[test]
    fn start_shows_first_slide_without_progress() {
        let h = Harness::started(standard());
        assert_eq!(h.engine.current_index(), 0);
        let calls = h.presentation.calls();
        assert!(calls.contains(&PresentationCall::ShowSlide(0)));
        assert!(calls.contains(&PresentationCall::ProgressVisible(false)));
        assert!(h.engine.swipe_enabled());
    }

    #[test]
    fn swipe_advances_intro_slides_only() {
        let mut h = Harness::started(standard());
        assert_eq!(
            h.swipe(),
            NavigationOutcome::Advanced { from: 0, to: 1 }
        );
        h.end_cooldown();
        assert_eq!(
            h.swipe(),
            NavigationOutcome::Advanced { from: 1, to: 2 }
        );
        h.end_cooldown();
        assert_eq!(
            h.swipe(),
            NavigationOutcome::Blocked(BlockReason::OutsideGestureRegion)
        );
        assert_eq!(h.engine.current_index(), 2);
    }

    #[test]
    fn option_click_records_and_defers_advance() {
        let mut h = Harness::started(standard());
        h.engine.restore(2, Vec::new()).unwrap();
        h.engine.clock_mut().advance(ChronoDuration::seconds(3));

        let outcome = h.answer("Often");
        assert_eq!(
            outcome,
            NavigationOutcome::AnswerRecorded {
                question_id: QuestionId::new(1)
            }
        );
        assert_eq!(h.engine.current_index(), 2);
        let response = &h.engine.progress().responses()[0];
        assert_eq!(response.question_text, "How often?");
        assert_eq!(response.selected_option, "Often");
        assert_eq!(response.time_spent_secs, 3.0);
        assert_eq!(h.rewards.answers(), vec![QuestionId::new(1)]);

        assert_eq!(
            h.fire(DeferredAction::AdvanceAfterAnswer),
            NavigationOutcome::Advanced { from: 2, to: 3 }
        );
        assert_eq!(h.presentation.last_percent(), Some(50.0));
        assert!(h.presentation.last_progress_visible().unwrap());
    }

    #[test]
    fn second_click_during_settle_delay_is_suppressed() {
        let mut h = Harness::started(standard());
        h.engine.restore(2, Vec::new()).unwrap();
        h.answer("Never");
        assert_eq!(h.answer("Often"), NavigationOutcome::Suppressed);
        assert_eq!(h.engine.progress().answered_count(), 1);
        assert_eq!(h.engine.resume_index(), 3);
    }

    #[test]
    fn answer_on_non_question_slide_is_ignored() {
        let mut h = Harness::started(standard());
        assert_eq!(h.answer("Anything"), NavigationOutcome::Ignored);
        assert_eq!(h.engine.progress().answered_count(), 0);
        assert!(!h.engine.state().pending_advance());
        assert_eq!(h.timer.pending(), 0);
    }

    #[test]
    fn empty_option_is_ignored() {
        let mut h = Harness::started(standard());
        h.engine.restore(2, Vec::new()).unwrap();
        assert_eq!(h.answer("  "), NavigationOutcome::Ignored);
        assert_eq!(h.engine.progress().answered_count(), 0);
    }

    #[test]
    fn answering_all_questions_completes_at_final_slide() {
        let mut h = Harness::started(standard());
        h.engine.restore(2, Vec::new()).unwrap();
        h.answer("Often");
        h.fire(DeferredAction::AdvanceAfterAnswer);
        h.answer("Long");

        let outcome = h.fire(DeferredAction::AdvanceAfterAnswer);
        let NavigationOutcome::Completed(summary) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(summary.responses.len(), 2);
        assert_eq!(h.engine.current_index(), 4);
        assert!(h.engine.is_complete());
        assert_eq!(h.presentation.last_percent(), Some(100.0));
        assert_eq!(h.rewards.completions(), 1);
    }

    #[test]
    fn completed_quiz_only_accepts_cta() {
        let mut h = Harness::started(standard());
        h.engine.restore(2, Vec::new()).unwrap();
        h.answer("Often");
        h.fire(DeferredAction::AdvanceAfterAnswer);
        h.answer("Long");
        h.fire(DeferredAction::AdvanceAfterAnswer);

        assert_eq!(
            h.engine.handle(InputEvent::ContinueClicked),
            NavigationOutcome::Blocked(BlockReason::Complete)
        );
        assert_eq!(
            h.engine.handle(InputEvent::CtaClicked),
            NavigationOutcome::Jumped { to: 5 }
        );
    }

    #[test]
    fn continue_click_advances_and_clamps_at_end() {
        let drafts = vec![
            SlideDraft::new(SlideKind::Congratulations),
            SlideDraft::new(SlideKind::Final),
        ];
        let mut h = Harness::started(drafts);
        assert_eq!(
            h.engine.handle(InputEvent::ContinueClicked),
            NavigationOutcome::Advanced { from: 0, to: 1 }
        );
        assert_eq!(
            h.engine.handle(InputEvent::ContinueClicked),
            NavigationOutcome::Ignored
        );
        assert_eq!(h.engine.current_index(), 1);
    }

    #[test]
    fn cta_without_sales_slide_redirects() {
        let drafts = vec![SlideDraft::new(SlideKind::Welcome), SlideDraft::new(SlideKind::Final)];
        let mut h = Harness::started(drafts);
        assert_eq!(
            h.engine.handle(InputEvent::CtaClicked),
            NavigationOutcome::ExternalRedirect { url: None }
        );
        assert_eq!(h.engine.current_index(), 0);
    }

    #[test]
    fn requires_read_gate_follows_scroll_events() {
        let drafts = vec![
            SlideDraft::new(SlideKind::Welcome),
            SlideDraft::new(SlideKind::Story).requiring_read(),
            SlideDraft::question(1, "Q", &["a"]),
        ];
        let mut h = Harness::new(drafts);
        h.presentation.set_scrollable(1);
        h.engine.start();
        h.swipe();
        h.end_cooldown();

        assert!(!h.engine.swipe_enabled());
        assert_eq!(
            h.presentation.last_gate(),
            Some((false, "scroll to read, then swipe".to_string()))
        );
        assert_eq!(
            h.engine.handle(InputEvent::ContentAtBottom(true)),
            NavigationOutcome::GateChanged { allowed: true }
        );
        assert_eq!(
            h.presentation.last_gate(),
            Some((true, "swipe to continue".to_string()))
        );
        assert_eq!(
            h.engine.handle(InputEvent::ContentAtBottom(false)),
            NavigationOutcome::Ignored
        );
        assert!(h.engine.swipe_enabled());
    }

    #[test]
    fn no_swipe_slide_blocks_gestures_without_scrollable_content() {
        let drafts = vec![
            SlideDraft::new(SlideKind::Welcome).without_swipe(),
            SlideDraft::new(SlideKind::Story),
        ];
        let mut h = Harness::started(drafts);
        assert_eq!(h.swipe(), NavigationOutcome::Blocked(BlockReason::Gate));
        h.end_cooldown();
        assert_eq!(
            h.engine.handle(InputEvent::ContentAtBottom(true)),
            NavigationOutcome::Ignored
        );
        assert_eq!(h.swipe(), NavigationOutcome::Blocked(BlockReason::Gate));
        assert_eq!(
            h.engine.handle(InputEvent::ContinueClicked),
            NavigationOutcome::Advanced { from: 0, to: 1 }
        );
    }

    #[test]
    fn restore_rejects_absent_slide() {
        let mut h = Harness::started(standard());
        assert_eq!(
            h.engine.restore(6, Vec::new()),
            Err(ConfigurationError::SlideOutOfRange { index: 6, count: 6 })
        );
        assert_eq!(h.engine.current_index(), 0);
    }

    #[test]
    fn restore_keeps_saved_responses() {
        let mut h = Harness::started(standard());
        let saved = vec![Response::new(
            QuestionId::new(1),
            "How often?",
            "Never",
            2.0,
            h.engine.clock().now(),
        )];
        h.engine.restore(3, saved).unwrap();
        assert_eq!(h.engine.progress().answered_count(), 1);
        assert_eq!(h.presentation.last_percent(), Some(50.0));
        assert!(!h.engine.is_complete());
    }

    #[test]
    fn restore_of_fully_answered_attempt_completes() {
        let mut h = Harness::started(standard());
        let now = h.engine.clock().now();
        let saved = vec![
            Response::new(QuestionId::new(1), "How often?", "Never", 2.0, now),
            Response::new(QuestionId::new(2), "How long?", "Long", 3.0, now),
        ];

        let outcome = h.engine.restore(4, saved).unwrap();

        assert!(matches!(outcome, NavigationOutcome::Completed(_)));
        assert!(h.engine.is_complete());
        assert_eq!(h.engine.current_index(), 4);
        assert_eq!(h.rewards.completions(), 1);
        assert_eq!(h.presentation.last_percent(), Some(100.0));
        assert_eq!(
            h.engine.handle(InputEvent::CtaClicked),
            NavigationOutcome::Jumped { to: 5 }
        );
    }

    #[test]
    fn index_is_published_to_watchers() {
        let mut h = Harness::started(standard());
        let guard = h.engine.leave_guard();
        assert!(!guard.should_confirm_leave());
        h.engine.restore(2, Vec::new()).unwrap();
        assert_eq!(guard.current_index(), 2);
        assert!(guard.should_confirm_leave());
    }

    #[test]
    fn wheel_and_touch_events_are_recognized() {
        let mut h = Harness::started(standard());
        assert_eq!(
            h.engine.handle(InputEvent::Wheel { delta_y: -10.0 }),
            NavigationOutcome::Ignored
        );
        assert_eq!(
            h.engine.handle(InputEvent::Wheel { delta_y: -80.0 }),
            NavigationOutcome::Advanced { from: 0, to: 1 }
        );
        h.end_cooldown();
        h.engine.handle(InputEvent::TouchStart { y: 500.0 });
        assert_eq!(
            h.engine.handle(InputEvent::TouchEnd { y: 300.0 }),
            NavigationOutcome::Advanced { from: 1, to: 2 }
        );
    }
}
