#![forbid(unsafe_code)]

pub mod definition;
pub mod error;
pub mod navigation;
pub mod ports;
pub mod quiz_loop;
pub mod scheduler;
pub mod testing;

pub use quiz_core::Clock;

pub use definition::QuizDefinition;
pub use error::QuizError;
pub use navigation::{
    BlockReason, EnginePorts, InputEvent, NavigationEngine, NavigationOutcome, NavigationState,
    Trigger,
};
pub use ports::{LeaveGuard, NoopPresentation, PresentationAdapter, RewardEffectsPort};
pub use quiz_loop::QuizLoopService;
pub use scheduler::{DeferredAction, DeferredToken, ManualTimer, TimerService, TokioTimer};
