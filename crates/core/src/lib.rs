#![forbid(unsafe_code)]

pub mod error;
pub mod gate;
pub mod model;
pub mod progress;
pub mod registry;
pub mod time;

pub use error::{ConfigurationError, Error, MalformedResponseError};
pub use gate::{GateController, GateStatus, ScrollMetrics};
pub use progress::ProgressTracker;
pub use registry::SlideRegistry;
pub use time::Clock;

/// Slides at the start of the sequence that accept gesture navigation.
pub const GESTURE_SLIDE_COUNT: usize = 2;
