//! Deferred work for the navigation engine.
//!
//! The engine never sleeps. It hands a [`DeferredToken`] to a
//! [`TimerService`] together with a delay; the host feeds the token back as
//! `InputEvent::TimerFired` once the delay has elapsed. Tokens carry the
//! engine generation, so tokens issued before a restart are ignored.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::warn;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// Move on after an answer click, once the UI has settled.
    AdvanceAfterAnswer,
    /// Re-accept gestures after the cool-down window.
    EndCooldown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeferredToken {
    pub generation: u64,
    pub action: DeferredAction,
}

pub trait TimerService: Send {
    fn schedule(&mut self, delay: Duration, token: DeferredToken);
}

/// A scheduled token, as recorded by [`ManualTimer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub delay: Duration,
    pub token: DeferredToken,
}

/// Timer that only records what was scheduled; the owner decides when tokens fire.
#[derive(Clone, Default)]
pub struct ManualTimer {
    scheduled: Arc<Mutex<Vec<Scheduled>>>,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every token scheduled so far, in scheduling order.
    #[must_use]
    pub fn drain(&self) -> Vec<Scheduled> {
        self.scheduled
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Take the oldest pending token for `action`, leaving the others queued.
    #[must_use]
    pub fn take(&self, action: DeferredAction) -> Option<DeferredToken> {
        let mut guard = self.scheduled.lock().ok()?;
        let pos = guard.iter().position(|s| s.token.action == action)?;
        Some(guard.remove(pos).token)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.scheduled.lock().map(|g| g.len()).unwrap_or(0)
    }
}

impl TimerService for ManualTimer {
    fn schedule(&mut self, delay: Duration, token: DeferredToken) {
        if let Ok(mut guard) = self.scheduled.lock() {
            guard.push(Scheduled { delay, token });
        }
    }
}

/// Timer backed by the tokio runtime: each token is delivered on the
/// receiver returned by [`TokioTimer::channel`] after its delay.
#[derive(Clone)]
pub struct TokioTimer {
    tx: mpsc::UnboundedSender<DeferredToken>,
}

impl TokioTimer {
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DeferredToken>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TimerService for TokioTimer {
    fn schedule(&mut self, delay: Duration, token: DeferredToken) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime; dropping deferred {:?}", token.action);
            return;
        };
        let tx = self.tx.clone();
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // receiver gone means the host shut down
            let _ = tx.send(token);
        });
    }
}
