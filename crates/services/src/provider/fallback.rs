use tracing::warn;

use conjugaison_core::model::{Challenge, ChallengeDraft};

use crate::error::{ProviderError, SessionError};

/// How a provider result becomes a challenge the session can always show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Generated(Challenge),
    Fallback(Challenge),
}

/// Substitutes a canned challenge whenever generation fails.
///
/// The fallback draft is validated on every use, so an invalid draft surfaces as
/// `SessionError::FallbackUnavailable` instead of a broken round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPolicy {
    draft: ChallengeDraft,
}

impl FallbackPolicy {
    #[must_use]
    pub fn new(draft: ChallengeDraft) -> Self {
        Self { draft }
    }

    /// # Errors
    ///
    /// Returns `SessionError::FallbackUnavailable` if the fallback draft is invalid.
    pub fn fallback(&self) -> Result<Challenge, SessionError> {
        self.draft
            .clone()
            .validate()
            .map_err(SessionError::FallbackUnavailable)
    }

    /// Pass a generated challenge through, or replace a failure with the fallback.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::FallbackUnavailable` only when generation failed and the
    /// fallback draft is itself invalid.
    pub fn resolve(
        &self,
        result: Result<Challenge, ProviderError>,
    ) -> Result<Resolved, SessionError> {
        match result {
            Ok(challenge) => Ok(Resolved::Generated(challenge)),
            Err(err) => {
                warn!(error = %err, verb = %self.draft.verb, "challenge generation failed, serving fallback");
                self.fallback().map(Resolved::Fallback)
            }
        }
    }
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::new(ChallengeDraft::fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_challenge_passes_through() {
        let policy = FallbackPolicy::default();
        let mut draft = ChallengeDraft::fallback();
        draft.verb = "Avoir (generated)".into();
        let generated = draft.validate().unwrap();
        let resolved = policy.resolve(Ok(generated.clone())).unwrap();
        assert_eq!(resolved, Resolved::Generated(generated));
    }

    #[test]
    fn failure_is_replaced_with_avoir() {
        let policy = FallbackPolicy::default();
        let resolved = policy.resolve(Err(ProviderError::Quota)).unwrap();
        let Resolved::Fallback(challenge) = resolved else {
            panic!("expected fallback");
        };
        assert_eq!(challenge.verb(), "Avoir");
    }

    #[test]
    fn invalid_fallback_is_reported() {
        let mut draft = ChallengeDraft::fallback();
        draft.items.clear();
        let policy = FallbackPolicy::new(draft);
        let err = policy.resolve(Err(ProviderError::EmptyResponse)).unwrap_err();
        assert!(matches!(err, SessionError::FallbackUnavailable(_)));
    }
}
