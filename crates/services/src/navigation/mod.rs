//! Slide navigation: input recognition, the engine state machine and its
//! outcomes.

mod engine;
mod input;
mod outcome;
mod state;

pub use engine::{EnginePorts, NavigationEngine};
pub use input::{GestureRecognizer, InputEvent, Trigger};
pub use outcome::{BlockReason, NavigationOutcome};
pub use state::NavigationState;
