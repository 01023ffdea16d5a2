mod ids;
mod response;
mod settings;
mod slide;

pub use ids::{ParseIdError, QuestionId};
pub use response::{CompletionSummary, Response};
pub use settings::{QuizSettings, QuizSettingsDraft, SettingsError};
pub use slide::{
    ATTR_NO_SWIPE, ATTR_QUESTION, ATTR_QUESTION_ID, ATTR_REQUIRES_READ, Slide, SlideDraft,
    SlideKind,
};
