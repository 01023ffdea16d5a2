//! Line-oriented rendering of the quiz for a terminal.

use std::collections::HashSet;

use quiz_core::SlideRegistry;
use quiz_core::model::{QuestionId, SlideKind};
use services::{PresentationAdapter, RewardEffectsPort};

struct SlideView {
    kind: SlideKind,
    title: Option<String>,
    question: String,
    options: Vec<String>,
}

/// Prints each shown slide with its options, the progress bar and the
/// gate indicator.
pub struct TerminalPresentation {
    slides: Vec<SlideView>,
    // slides whose content starts above the fold until the reader scrolls
    unread: HashSet<usize>,
    progress_visible: bool,
}

impl TerminalPresentation {
    pub fn new(registry: &SlideRegistry) -> Self {
        let slides = registry
            .slides()
            .iter()
            .map(|slide| SlideView {
                kind: slide.kind(),
                title: slide.title().map(str::to_string),
                question: slide.question_text().to_string(),
                options: slide.options().to_vec(),
            })
            .collect();
        let unread = registry
            .slides()
            .iter()
            .filter(|slide| slide.requires_read())
            .map(|slide| slide.index())
            .collect();
        Self {
            slides,
            unread,
            progress_visible: false,
        }
    }
}

impl PresentationAdapter for TerminalPresentation {
    fn hide_all(&mut self) {
        println!();
    }

    fn show_slide(&mut self, index: usize) {
        let Some(view) = self.slides.get(index) else {
            return;
        };
        println!("── slide {} / {} ({}) ──", index + 1, self.slides.len(), view.kind);
        if let Some(title) = view.title.as_deref() {
            println!("{title}");
        }
        if view.kind == SlideKind::Question {
            println!("{}", view.question);
            for (n, option) in view.options.iter().enumerate() {
                println!("  {}) {option}", n + 1);
            }
        }
        if self.unread.contains(&index) {
            println!("(long read: type `bottom` once you reached the end)");
        }
    }

    fn set_progress_percent(&mut self, percent: f64) {
        if !self.progress_visible {
            return;
        }
        let filled = (percent / 5.0).round().clamp(0.0, 20.0) as usize;
        println!(
            "[{}{}] {percent:.0}%",
            "#".repeat(filled),
            "-".repeat(20 - filled)
        );
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.progress_visible = visible;
    }

    fn set_gate_indicator(&mut self, enabled: bool, label: &str) {
        if label.is_empty() {
            return;
        }
        let mark = if enabled { "↑" } else { "…" };
        println!("{mark} {label}");
    }

    fn scroll_at_bottom(&self, index: usize) -> bool {
        !self.unread.contains(&index)
    }
}

/// Text stand-ins for click sounds and confetti.
pub struct TerminalRewards;

impl RewardEffectsPort for TerminalRewards {
    fn answer_selected(&mut self, question_id: QuestionId) {
        println!("✓ answer to question {question_id} noted");
    }

    fn quiz_completed(&mut self) {
        println!("*** quiz complete ***");
    }
}
