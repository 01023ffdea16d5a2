use std::sync::Arc;

use log::{debug, info, warn};
use storage::repository::{ProgressRecord, ProgressStore};

use crate::error::QuizError;
use crate::navigation::{InputEvent, NavigationEngine, NavigationOutcome};

/// Runs engine events and keeps saved progress in step with them.
///
/// Saves after each recorded answer and clears the saved attempt on completion
/// or restart. Storage failures are logged and never change navigation.
#[derive(Clone, Default)]
pub struct QuizLoopService {
    store: Option<Arc<dyn ProgressStore>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store: Some(store) }
    }

    #[must_use]
    pub fn without_persistence() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// A previously saved attempt, if one exists and can be read.
    pub async fn saved_progress(&self) -> Option<ProgressRecord> {
        let store = self.store.as_ref()?;
        match store.load().await {
            Ok(record) => record,
            Err(err) => {
                warn!("failed to load saved progress: {err}");
                None
            }
        }
    }

    /// Start a fresh attempt, discarding any saved one.
    pub async fn start(&self, engine: &mut NavigationEngine) {
        engine.start();
        self.clear().await;
    }

    /// Continue a saved attempt. A saved attempt that already answers every
    /// question completes here and its record is cleared.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Configuration` if the saved slide no longer exists
    /// in this quiz.
    pub async fn resume(
        &self,
        engine: &mut NavigationEngine,
        record: ProgressRecord,
    ) -> Result<NavigationOutcome, QuizError> {
        let outcome = engine.restore(record.current_index, record.responses)?;
        if matches!(outcome, NavigationOutcome::Completed(_)) {
            self.clear().await;
        }
        Ok(outcome)
    }

    /// Feed one event to the engine and persist what it changed.
    pub async fn dispatch(
        &self,
        engine: &mut NavigationEngine,
        event: InputEvent,
    ) -> NavigationOutcome {
        let outcome = engine.handle(event);
        match &outcome {
            NavigationOutcome::AnswerRecorded { .. } => self.save(engine).await,
            NavigationOutcome::Completed(_) | NavigationOutcome::Restarted => self.clear().await,
            _ => {}
        }
        outcome
    }

    async fn save(&self, engine: &NavigationEngine) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        let record = ProgressRecord::new(
            engine.resume_index(),
            engine.progress().responses().to_vec(),
            engine.clock().now(),
        );
        match store.save(&record).await {
            Ok(()) => debug!(
                "saved progress at slide {} ({} answers)",
                record.current_index,
                record.responses.len()
            ),
            Err(err) => warn!("failed to save progress: {err}"),
        }
    }

    async fn clear(&self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match store.clear().await {
            Ok(()) => info!("cleared saved progress"),
            Err(err) => warn!("failed to clear saved progress: {err}"),
        }
    }
}
