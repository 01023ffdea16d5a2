use thiserror::Error;

use crate::model::{QuestionId, SettingsError, SlideKind};

/// Structural problems in a slide sequence. Fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("quiz has no slides")]
    NoSlides,

    #[error("slide {index} is out of range (slide count {count})")]
    SlideOutOfRange { index: usize, count: usize },

    #[error("question slide {index} has no question id")]
    MissingQuestionId { index: usize },

    #[error("question slide {index} has an invalid question id: {raw:?}")]
    InvalidQuestionId { index: usize, raw: String },

    #[error("question id {id} is used by slides {first} and {second}")]
    DuplicateQuestionId {
        id: QuestionId,
        first: usize,
        second: usize,
    },

    #[error("slide {index} is marked as a question but declared as {kind}")]
    ConflictingKind { index: usize, kind: SlideKind },
}

/// An answer event that cannot be attributed to a question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedResponseError {
    #[error("slide {index} ({kind}) has no question id")]
    NoQuestionId { index: usize, kind: SlideKind },

    #[error("empty option label on question {question_id}")]
    EmptyOption { question_id: QuestionId },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlideRegistry;
    use crate::model::QuizSettingsDraft;

    fn load(slides_ok: bool) -> Result<SlideRegistry, Error> {
        QuizSettingsDraft::new().validate()?;
        let drafts = if slides_ok {
            vec![crate::model::SlideDraft::new(SlideKind::Final)]
        } else {
            Vec::new()
        };
        Ok(SlideRegistry::from_drafts(drafts)?)
    }

    #[test]
    fn layer_errors_convert_into_crate_error() {
        assert!(load(true).is_ok());
        let err = load(false).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::NoSlides)
        ));
        assert_eq!(err.to_string(), "quiz has no slides");
    }

    #[test]
    fn malformed_response_message_names_the_slide() {
        let err = MalformedResponseError::NoQuestionId {
            index: 3,
            kind: SlideKind::Story,
        };
        assert_eq!(err.to_string(), "slide 3 (story) has no question id");
    }
}
