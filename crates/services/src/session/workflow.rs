use std::sync::Arc;

use tokio::sync::Mutex;

use conjugaison_core::model::{Challenge, TenseSelection};

use crate::error::{ProviderError, SessionError};
use crate::provider::ChallengeProvider;
use super::controller::{LoadOutcome, LoadTicket, SessionController};

/// Session state shared with a multi-threaded host.
///
/// Every intent takes the lock, so a check always sees a settled answer sheet.
pub type SharedSession = Arc<Mutex<SessionController>>;

/// Orchestrates challenge loading between a session and its provider.
#[derive(Clone)]
pub struct SessionLoopService {
    provider: Arc<dyn ChallengeProvider>,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(provider: Arc<dyn ChallengeProvider>) -> Self {
        Self { provider }
    }

    #[must_use]
    pub fn new_session(&self, selected: TenseSelection) -> SharedSession {
        Arc::new(Mutex::new(SessionController::new(selected)))
    }

    /// Ask the provider for the challenge described by `ticket`.
    ///
    /// Hosts that own the controller directly call this between
    /// `begin_load` and `complete_load`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` unchanged; the controller applies the fallback.
    pub async fn fetch(&self, ticket: &LoadTicket) -> Result<Challenge, ProviderError> {
        self.provider.generate_challenge(ticket.tenses()).await
    }

    /// Load a challenge with the session's current tenses, superseding any pending load.
    ///
    /// The lock is released while the provider runs.
    pub async fn load_challenge(&self, session: &SharedSession) -> LoadOutcome {
        let ticket = session.lock().await.begin_load();
        self.settle(session, ticket).await
    }

    /// Move on from a reviewed round (or retry after an error).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReviewed` while the current round is unanswered.
    pub async fn load_next(&self, session: &SharedSession) -> Result<LoadOutcome, SessionError> {
        let ticket = session.lock().await.load_next()?;
        Ok(self.settle(session, ticket).await)
    }

    async fn settle(&self, session: &SharedSession, ticket: LoadTicket) -> LoadOutcome {
        let result = self.fetch(&ticket).await;
        session.lock().await.complete_load(ticket, result)
    }
}
