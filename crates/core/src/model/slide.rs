use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

//
// ─── PROTOCOL ──────────────────────────────────────────────────────────────────
//

/// Marks a slide as a question slide.
pub const ATTR_QUESTION: &str = "data-question";
/// Numeric identifier of a question slide.
pub const ATTR_QUESTION_ID: &str = "data-question-id";
/// The slide content must be scrolled to its end before gestures unlock.
pub const ATTR_REQUIRES_READ: &str = "data-requires-read";
/// Gesture navigation is disabled on this slide.
pub const ATTR_NO_SWIPE: &str = "data-no-swipe";

//
// ─── KIND ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideKind {
    Welcome,
    Story,
    Question,
    Congratulations,
    Sales,
    Final,
}

impl SlideKind {
    /// Whether the progress bar is shown while a slide of this kind is current.
    #[must_use]
    pub fn shows_progress(self) -> bool {
        matches!(self, Self::Question | Self::Final)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Story => "story",
            Self::Question => "question",
            Self::Congratulations => "congratulations",
            Self::Sales => "sales",
            Self::Final => "final",
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SLIDE ─────────────────────────────────────────────────────────────────────
//

/// One full-screen content unit in the fixed slide sequence.
///
/// Slides are only constructed by [`crate::SlideRegistry`], which guarantees
/// contiguous indices and a question id on every question slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    index: usize,
    kind: SlideKind,
    question_id: Option<QuestionId>,
    requires_read: bool,
    no_swipe: bool,
    title: Option<String>,
    question_text: Option<String>,
    options: Vec<String>,
}

impl Slide {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        index: usize,
        kind: SlideKind,
        question_id: Option<QuestionId>,
        requires_read: bool,
        no_swipe: bool,
        title: Option<String>,
        question_text: Option<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            index,
            kind,
            question_id,
            requires_read,
            no_swipe,
            title,
            question_text,
            options,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn kind(&self) -> SlideKind {
        self.kind
    }

    #[must_use]
    pub fn question_id(&self) -> Option<QuestionId> {
        self.question_id
    }

    #[must_use]
    pub fn is_question(&self) -> bool {
        self.kind == SlideKind::Question
    }

    #[must_use]
    pub fn requires_read(&self) -> bool {
        self.requires_read
    }

    #[must_use]
    pub fn no_swipe(&self) -> bool {
        self.no_swipe
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Text recorded with a response; falls back to the title.
    #[must_use]
    pub fn question_text(&self) -> &str {
        self.question_text
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Authored description of a slide, as read from a quiz definition.
///
/// Behavior is driven by `attributes` (see the `ATTR_*` constants); `kind` may
/// be omitted, in which case the question marker decides between
/// `Question` and `Story`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SlideKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl SlideDraft {
    #[must_use]
    pub fn new(kind: SlideKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Question slide with the given id, marker included.
    #[must_use]
    pub fn question(id: u32, text: impl Into<String>, options: &[&str]) -> Self {
        Self {
            kind: Some(SlideKind::Question),
            question: Some(text.into()),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            ..Self::default()
        }
        .with_attribute(ATTR_QUESTION, "")
        .with_attribute(ATTR_QUESTION_ID, id.to_string())
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn requiring_read(self) -> Self {
        self.with_attribute(ATTR_REQUIRES_READ, "true")
    }

    #[must_use]
    pub fn without_swipe(self) -> Self {
        self.with_attribute(ATTR_NO_SWIPE, "")
    }

    /// Reads a boolean marker: present with an empty value or `"true"`.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .is_some_and(|v| v.is_empty() || v.trim().eq_ignore_ascii_case("true"))
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_empty_and_true() {
        let draft = SlideDraft::new(SlideKind::Story)
            .with_attribute(ATTR_NO_SWIPE, "")
            .with_attribute(ATTR_REQUIRES_READ, "TRUE");
        assert!(draft.flag(ATTR_NO_SWIPE));
        assert!(draft.flag(ATTR_REQUIRES_READ));
    }

    #[test]
    fn flag_rejects_false_and_missing() {
        let draft = SlideDraft::new(SlideKind::Story).with_attribute(ATTR_REQUIRES_READ, "false");
        assert!(!draft.flag(ATTR_REQUIRES_READ));
        assert!(!draft.flag(ATTR_NO_SWIPE));
    }

    #[test]
    fn draft_deserializes_kebab_case_kind() {
        let draft: SlideDraft = serde_json::from_str(
            r#"{"kind":"congratulations","attributes":{"data-no-swipe":""}}"#,
        )
        .unwrap();
        assert_eq!(draft.kind, Some(SlideKind::Congratulations));
        assert!(draft.flag(ATTR_NO_SWIPE));
    }

    #[test]
    fn progress_visible_only_on_questions_and_final() {
        assert!(SlideKind::Question.shows_progress());
        assert!(SlideKind::Final.shows_progress());
        assert!(!SlideKind::Welcome.shows_progress());
        assert!(!SlideKind::Story.shows_progress());
        assert!(!SlideKind::Sales.shows_progress());
    }
}
