use std::collections::HashMap;

use crate::error::ConfigurationError;
use crate::model::{
    ATTR_NO_SWIPE, ATTR_QUESTION, ATTR_QUESTION_ID, ATTR_REQUIRES_READ, QuestionId, Slide,
    SlideDraft, SlideKind,
};

/// Ordered, immutable view of the slide sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
    question_count: usize,
    first_question: Option<usize>,
}

impl SlideRegistry {
    /// Build the registry from authored drafts, in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NoSlides` for an empty sequence, and the
    /// question-id variants when a question slide cannot be identified.
    pub fn from_drafts(drafts: Vec<SlideDraft>) -> Result<Self, ConfigurationError> {
        if drafts.is_empty() {
            return Err(ConfigurationError::NoSlides);
        }

        let mut seen: HashMap<QuestionId, usize> = HashMap::new();
        let mut slides = Vec::with_capacity(drafts.len());

        for (index, draft) in drafts.into_iter().enumerate() {
            let marked = draft.flag(ATTR_QUESTION);
            let kind = match draft.kind {
                Some(kind) if marked && kind != SlideKind::Question => {
                    return Err(ConfigurationError::ConflictingKind { index, kind });
                }
                Some(kind) => kind,
                None if marked => SlideKind::Question,
                None => SlideKind::Story,
            };

            let question_id = if kind == SlideKind::Question {
                let raw = draft
                    .attribute(ATTR_QUESTION_ID)
                    .ok_or(ConfigurationError::MissingQuestionId { index })?;
                let id: QuestionId =
                    raw.parse()
                        .map_err(|_| ConfigurationError::InvalidQuestionId {
                            index,
                            raw: raw.to_string(),
                        })?;
                if let Some(first) = seen.insert(id, index) {
                    return Err(ConfigurationError::DuplicateQuestionId {
                        id,
                        first,
                        second: index,
                    });
                }
                Some(id)
            } else {
                None
            };

            slides.push(Slide::new(
                index,
                kind,
                question_id,
                draft.flag(ATTR_REQUIRES_READ),
                draft.flag(ATTR_NO_SWIPE),
                draft.title,
                draft.question,
                draft.options,
            ));
        }

        let question_count = slides.iter().filter(|s| s.is_question()).count();
        let first_question = slides.iter().position(Slide::is_question);

        Ok(Self {
            slides,
            question_count,
            first_question,
        })
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// # Errors
    ///
    /// Returns `ConfigurationError::SlideOutOfRange` if `index` is absent.
    pub fn slide_at(&self, index: usize) -> Result<&Slide, ConfigurationError> {
        self.slides
            .get(index)
            .ok_or(ConfigurationError::SlideOutOfRange {
                index,
                count: self.slides.len(),
            })
    }

    /// Slide at `index`, or the last slide when `index` is past the end.
    #[must_use]
    pub fn slide_clamped(&self, index: usize) -> &Slide {
        let last = self.slides.len() - 1;
        &self.slides[index.min(last)]
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Index of the first question slide, if any.
    #[must_use]
    pub fn first_question_index(&self) -> Option<usize> {
        self.first_question
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn is_last_slide(&self, index: usize) -> bool {
        index + 1 == self.slides.len()
    }

    #[must_use]
    pub fn index_of_kind(&self, kind: SlideKind) -> Option<usize> {
        self.slides.iter().position(|s| s.kind() == kind)
    }

    /// Terminal slide: the first `Final` slide, else the last slide.
    #[must_use]
    pub fn final_index(&self) -> usize {
        self.index_of_kind(SlideKind::Final)
            .unwrap_or(self.slides.len() - 1)
    }

    #[must_use]
    pub fn sales_index(&self) -> Option<usize> {
        self.index_of_kind(SlideKind::Sales)
    }

    #[must_use]
    pub fn index_of_question(&self, id: QuestionId) -> Option<usize> {
        self.slides.iter().position(|s| s.question_id() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Vec<SlideDraft> {
        vec![
            SlideDraft::new(SlideKind::Welcome),
            SlideDraft::new(SlideKind::Story).requiring_read(),
            SlideDraft::question(1, "First?", &["a", "b"]),
            SlideDraft::question(2, "Second?", &["a", "b"]),
            SlideDraft::new(SlideKind::Final),
            SlideDraft::new(SlideKind::Sales),
        ]
    }

    #[test]
    fn empty_registry_is_rejected() {
        assert_eq!(
            SlideRegistry::from_drafts(Vec::new()),
            Err(ConfigurationError::NoSlides)
        );
    }

    #[test]
    fn derives_question_metadata() {
        let registry = SlideRegistry::from_drafts(standard()).unwrap();
        assert_eq!(registry.slide_count(), 6);
        assert_eq!(registry.question_count(), 2);
        assert_eq!(registry.first_question_index(), Some(2));
        assert_eq!(registry.final_index(), 4);
        assert_eq!(registry.sales_index(), Some(5));
        assert!(registry.is_last_slide(5));
        assert!(!registry.is_last_slide(4));
        assert!(registry.slide_at(1).unwrap().requires_read());
        assert_eq!(
            registry.slide_at(3).unwrap().question_id(),
            Some(QuestionId::new(2))
        );
        assert_eq!(registry.index_of_question(QuestionId::new(2)), Some(3));
    }

    #[test]
    fn indices_are_contiguous() {
        let registry = SlideRegistry::from_drafts(standard()).unwrap();
        for (pos, slide) in registry.slides().iter().enumerate() {
            assert_eq!(slide.index(), pos);
        }
    }

    #[test]
    fn slide_at_out_of_range() {
        let registry = SlideRegistry::from_drafts(standard()).unwrap();
        assert_eq!(
            registry.slide_at(6),
            Err(ConfigurationError::SlideOutOfRange { index: 6, count: 6 })
        );
    }

    #[test]
    fn marker_without_kind_becomes_question() {
        let draft = SlideDraft::default()
            .with_attribute(ATTR_QUESTION, "true")
            .with_attribute(ATTR_QUESTION_ID, "9");
        let registry = SlideRegistry::from_drafts(vec![draft, SlideDraft::default()]).unwrap();
        assert_eq!(registry.slide_at(0).unwrap().kind(), SlideKind::Question);
        assert_eq!(registry.slide_at(1).unwrap().kind(), SlideKind::Story);
    }

    #[test]
    fn marker_on_other_kind_conflicts() {
        let draft = SlideDraft::new(SlideKind::Sales).with_attribute(ATTR_QUESTION, "");
        assert_eq!(
            SlideRegistry::from_drafts(vec![draft]),
            Err(ConfigurationError::ConflictingKind {
                index: 0,
                kind: SlideKind::Sales
            })
        );
    }

    #[test]
    fn question_without_id_is_rejected() {
        let draft = SlideDraft::new(SlideKind::Question);
        assert_eq!(
            SlideRegistry::from_drafts(vec![draft]),
            Err(ConfigurationError::MissingQuestionId { index: 0 })
        );
    }

    #[test]
    fn invalid_and_duplicate_ids_are_rejected() {
        let bad = SlideDraft::new(SlideKind::Question).with_attribute(ATTR_QUESTION_ID, "x1");
        assert!(matches!(
            SlideRegistry::from_drafts(vec![bad]),
            Err(ConfigurationError::InvalidQuestionId { index: 0, .. })
        ));

        let dup = vec![
            SlideDraft::question(4, "A", &[]),
            SlideDraft::question(4, "B", &[]),
        ];
        assert_eq!(
            SlideRegistry::from_drafts(dup),
            Err(ConfigurationError::DuplicateQuestionId {
                id: QuestionId::new(4),
                first: 0,
                second: 1
            })
        );
    }

    #[test]
    fn final_index_falls_back_to_last_slide() {
        let registry =
            SlideRegistry::from_drafts(vec![SlideDraft::question(1, "Only", &["yes"])]).unwrap();
        assert_eq!(registry.final_index(), 0);
        assert_eq!(registry.sales_index(), None);
    }
}
