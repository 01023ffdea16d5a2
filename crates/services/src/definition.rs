//! Quiz definitions as authored on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use quiz_core::SlideRegistry;
use quiz_core::model::{QuizSettings, QuizSettingsDraft, SlideDraft};

use crate::error::QuizError;

/// A quiz as written in JSON: optional settings plus the ordered slides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizDefinition {
    pub settings: QuizSettingsDraft,
    pub slides: Vec<SlideDraft>,
}

impl QuizDefinition {
    /// # Errors
    ///
    /// Returns `QuizError::Definition` for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns `QuizError::Io` if the file cannot be read, or
    /// `QuizError::Definition` for malformed JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Validate settings and slides.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Settings` or `QuizError::Configuration`.
    pub fn build(self) -> Result<(SlideRegistry, QuizSettings), QuizError> {
        let settings = self.settings.validate()?;
        let registry = SlideRegistry::from_drafts(self.slides)?;
        Ok((registry, settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::ConfigurationError;
    use quiz_core::model::{QuestionId, SlideKind};
    use std::time::Duration;

    const QUIZ: &str = r#"{
        "settings": { "settle_delay_ms": 500 },
        "slides": [
            { "kind": "welcome", "title": "Hi" },
            { "kind": "story", "attributes": { "data-requires-read": "true" } },
            {
                "question": "Pick one",
                "options": ["A", "B"],
                "attributes": { "data-question": "", "data-question-id": "7" }
            },
            { "kind": "final" }
        ]
    }"#;

    #[test]
    fn parses_and_builds() {
        let (registry, settings) = QuizDefinition::from_json(QUIZ).unwrap().build().unwrap();
        assert_eq!(registry.slide_count(), 4);
        assert_eq!(registry.question_count(), 1);
        assert!(registry.slide_clamped(1).requires_read());
        let question = registry.slide_clamped(2);
        assert_eq!(question.kind(), SlideKind::Question);
        assert_eq!(question.question_id(), Some(QuestionId::new(7)));
        assert_eq!(settings.settle_delay(), Duration::from_millis(500));
        assert_eq!(settings.gesture_cooldown(), Duration::from_millis(600));
    }

    #[test]
    fn empty_definition_has_no_slides() {
        let err = QuizDefinition::from_json("{}").unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            QuizError::Configuration(ConfigurationError::NoSlides)
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = QuizDefinition::from_json("{ slides: ").unwrap_err();
        assert!(matches!(err, QuizError::Definition(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = QuizDefinition::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, QuizError::Io { .. }));
    }
}
