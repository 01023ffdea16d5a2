use chrono::{DateTime, Utc};

/// The mutable part of one quiz attempt, owned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub(crate) current_index: usize,
    pub(crate) swipe_enabled: bool,
    pub(crate) slide_entered_at: DateTime<Utc>,
    pub(crate) generation: u64,
    pub(crate) cooling_down: bool,
    pub(crate) pending_advance: bool,
    pub(crate) complete: bool,
}

impl NavigationState {
    pub(crate) fn fresh(generation: u64, now: DateTime<Utc>) -> Self {
        Self {
            current_index: 0,
            swipe_enabled: true,
            slide_entered_at: now,
            generation,
            cooling_down: false,
            pending_advance: false,
            complete: false,
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn swipe_enabled(&self) -> bool {
        self.swipe_enabled
    }

    #[must_use]
    pub fn slide_entered_at(&self) -> DateTime<Utc> {
        self.slide_entered_at
    }

    /// Bumped on every start, restart and restore.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn cooling_down(&self) -> bool {
        self.cooling_down
    }

    #[must_use]
    pub fn pending_advance(&self) -> bool {
        self.pending_advance
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
