//! Shared error types for the services crate.

use thiserror::Error;

use conjugaison_core::model::{ChallengeError, RoundError, TenseSelectionError};

/// Errors emitted by a `ChallengeProvider`.
///
/// These never reach the learner: the session substitutes the fallback challenge.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("challenge provider is not configured")]
    Disabled,
    #[error("challenge provider quota exhausted")]
    Quota,
    #[error("challenge request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("challenge provider returned an empty response")]
    EmptyResponse,
    #[error("challenge response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ChallengeError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by the session controller when an intent does not apply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("a challenge is still loading")]
    LoadInProgress,
    #[error("no challenge is loaded")]
    NoActiveChallenge,
    #[error("answers were already checked")]
    AlreadyReviewed,
    #[error("answers must be checked before loading the next challenge")]
    NotReviewed,
    #[error("no answer field is focused")]
    NoFocus,
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error(transparent)]
    Tense(#[from] TenseSelectionError),
    #[error("fallback challenge is invalid: {0}")]
    FallbackUnavailable(#[source] ChallengeError),
}

/// Errors emitted while reading provider configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("model name cannot be empty")]
    EmptyModel,
}
