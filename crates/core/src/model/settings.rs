use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const DEFAULT_SETTLE_DELAY_MS: u64 = 800;
const DEFAULT_GESTURE_COOLDOWN_MS: u64 = 600;
const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;
const DEFAULT_WHEEL_THRESHOLD: f64 = 50.0;
const DEFAULT_SCROLL_BOTTOM_TOLERANCE_PX: f64 = 6.0;
const DEFAULT_SCROLLABLE_SLACK_PX: f64 = 2.0;
const DEFAULT_GATE_LABEL_OPEN: &str = "swipe to continue";
const DEFAULT_GATE_LABEL_LOCKED: &str = "scroll to read, then swipe";

/// Validated timing, threshold and label settings for one quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizSettings {
    settle_delay: Duration,
    gesture_cooldown: Duration,
    swipe_threshold_px: f64,
    wheel_threshold: f64,
    scroll_bottom_tolerance_px: f64,
    scrollable_slack_px: f64,
    gate_label_open: String,
    gate_label_locked: String,
    sales_redirect_url: Option<String>,
}

/// Unvalidated settings as authored in a quiz definition; every field is optional.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettingsDraft {
    pub settle_delay_ms: Option<u64>,
    pub gesture_cooldown_ms: Option<u64>,
    pub swipe_threshold_px: Option<f64>,
    pub wheel_threshold: Option<f64>,
    pub scroll_bottom_tolerance_px: Option<f64>,
    pub scrollable_slack_px: Option<f64>,
    pub gate_label_open: Option<String>,
    pub gate_label_locked: Option<String>,
    pub sales_redirect_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("settle delay must be > 0 ms")]
    InvalidSettleDelay,

    #[error("gesture cooldown must be > 0 ms")]
    InvalidGestureCooldown,

    #[error("{field} must be a finite, non-negative number")]
    InvalidDistance { field: &'static str },

    #[error("invalid sales redirect URL")]
    InvalidRedirectUrl,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` for zero timings, negative or non-finite
    /// distances, or an unparseable redirect URL.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let settle_delay_ms = self.settle_delay_ms.unwrap_or(DEFAULT_SETTLE_DELAY_MS);
        if settle_delay_ms == 0 {
            return Err(SettingsError::InvalidSettleDelay);
        }
        let gesture_cooldown_ms = self
            .gesture_cooldown_ms
            .unwrap_or(DEFAULT_GESTURE_COOLDOWN_MS);
        if gesture_cooldown_ms == 0 {
            return Err(SettingsError::InvalidGestureCooldown);
        }

        let swipe_threshold_px = distance(
            "swipe_threshold_px",
            self.swipe_threshold_px,
            DEFAULT_SWIPE_THRESHOLD_PX,
        )?;
        let wheel_threshold = distance(
            "wheel_threshold",
            self.wheel_threshold,
            DEFAULT_WHEEL_THRESHOLD,
        )?;
        let scroll_bottom_tolerance_px = distance(
            "scroll_bottom_tolerance_px",
            self.scroll_bottom_tolerance_px,
            DEFAULT_SCROLL_BOTTOM_TOLERANCE_PX,
        )?;
        let scrollable_slack_px = distance(
            "scrollable_slack_px",
            self.scrollable_slack_px,
            DEFAULT_SCROLLABLE_SLACK_PX,
        )?;

        let sales_redirect_url = normalize_optional(self.sales_redirect_url);
        if let Some(url) = sales_redirect_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(SettingsError::InvalidRedirectUrl);
            }
        }

        Ok(QuizSettings {
            settle_delay: Duration::from_millis(settle_delay_ms),
            gesture_cooldown: Duration::from_millis(gesture_cooldown_ms),
            swipe_threshold_px,
            wheel_threshold,
            scroll_bottom_tolerance_px,
            scrollable_slack_px,
            gate_label_open: normalize_optional(self.gate_label_open)
                .unwrap_or_else(|| DEFAULT_GATE_LABEL_OPEN.to_string()),
            gate_label_locked: normalize_optional(self.gate_label_locked)
                .unwrap_or_else(|| DEFAULT_GATE_LABEL_LOCKED.to_string()),
            sales_redirect_url,
        })
    }
}

impl QuizSettings {
    /// Delay between an answer click and the advance it triggers.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Window after a gesture during which further gestures are dropped.
    #[must_use]
    pub fn gesture_cooldown(&self) -> Duration {
        self.gesture_cooldown
    }

    #[must_use]
    pub fn swipe_threshold_px(&self) -> f64 {
        self.swipe_threshold_px
    }

    #[must_use]
    pub fn wheel_threshold(&self) -> f64 {
        self.wheel_threshold
    }

    #[must_use]
    pub fn scroll_bottom_tolerance_px(&self) -> f64 {
        self.scroll_bottom_tolerance_px
    }

    #[must_use]
    pub fn scrollable_slack_px(&self) -> f64 {
        self.scrollable_slack_px
    }

    #[must_use]
    pub fn gate_label_open(&self) -> &str {
        &self.gate_label_open
    }

    #[must_use]
    pub fn gate_label_locked(&self) -> &str {
        &self.gate_label_locked
    }

    #[must_use]
    pub fn sales_redirect_url(&self) -> Option<&str> {
        self.sales_redirect_url.as_deref()
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            gesture_cooldown: Duration::from_millis(DEFAULT_GESTURE_COOLDOWN_MS),
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            scroll_bottom_tolerance_px: DEFAULT_SCROLL_BOTTOM_TOLERANCE_PX,
            scrollable_slack_px: DEFAULT_SCROLLABLE_SLACK_PX,
            gate_label_open: DEFAULT_GATE_LABEL_OPEN.to_string(),
            gate_label_locked: DEFAULT_GATE_LABEL_LOCKED.to_string(),
            sales_redirect_url: None,
        }
    }
}

fn distance(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, SettingsError> {
    let value = value.unwrap_or(default);
    if !value.is_finite() || value < 0.0 {
        return Err(SettingsError::InvalidDistance { field });
    }
    Ok(value)
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_matches_defaults() {
        let settings = QuizSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, QuizSettings::default());
        assert_eq!(settings.settle_delay(), Duration::from_millis(800));
        assert_eq!(settings.gesture_cooldown(), Duration::from_millis(600));
    }

    #[test]
    fn zero_settle_delay_is_rejected() {
        let draft = QuizSettingsDraft {
            settle_delay_ms: Some(0),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(draft.validate(), Err(SettingsError::InvalidSettleDelay));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let draft = QuizSettingsDraft {
            swipe_threshold_px: Some(-1.0),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(SettingsError::InvalidDistance {
                field: "swipe_threshold_px"
            })
        );
    }

    #[test]
    fn redirect_url_is_validated_and_trimmed() {
        let bad = QuizSettingsDraft {
            sales_redirect_url: Some("not a url".into()),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(bad.validate(), Err(SettingsError::InvalidRedirectUrl));

        let good = QuizSettingsDraft {
            sales_redirect_url: Some("  https://example.com/offer  ".into()),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(
            good.validate().unwrap().sales_redirect_url(),
            Some("https://example.com/offer")
        );
    }

    #[test]
    fn blank_labels_fall_back_to_defaults() {
        let draft = QuizSettingsDraft {
            gate_label_open: Some("   ".into()),
            gate_label_locked: Some("read first".into()),
            ..QuizSettingsDraft::default()
        };
        let settings = draft.validate().unwrap();
        assert_eq!(settings.gate_label_open(), DEFAULT_GATE_LABEL_OPEN);
        assert_eq!(settings.gate_label_locked(), "read first");
    }
}
