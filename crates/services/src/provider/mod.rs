//! Sources of conjugation challenges.

mod fallback;
mod gemini;
mod prompt;

use async_trait::async_trait;

use conjugaison_core::model::{Challenge, ChallengeDraft, TenseSelection};

use crate::error::ProviderError;

pub use fallback::{FallbackPolicy, Resolved};
pub use gemini::GeminiProvider;
pub use prompt::{build_prompt, parse_challenge, response_schema};

/// Produces one conjugation table for the given tenses.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` for network, quota, or malformed-response failures.
    async fn generate_challenge(&self, tenses: &TenseSelection)
    -> Result<Challenge, ProviderError>;
}

/// Provider that serves the same draft every time, ignoring the requested tenses.
///
/// Used for offline mode and tests.
#[derive(Clone, Debug)]
pub struct StaticProvider {
    draft: ChallengeDraft,
}

impl StaticProvider {
    #[must_use]
    pub fn new(draft: ChallengeDraft) -> Self {
        Self { draft }
    }
}

impl Default for StaticProvider {
    fn default() -> Self {
        Self::new(ChallengeDraft::fallback())
    }
}

#[async_trait]
impl ChallengeProvider for StaticProvider {
    async fn generate_challenge(
        &self,
        _tenses: &TenseSelection,
    ) -> Result<Challenge, ProviderError> {
        Ok(self.draft.clone().validate()?)
    }
}
