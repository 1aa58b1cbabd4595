#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod provider;
pub mod session;

pub use config::{ProviderConfig, ProviderConfigDraft};
pub use error::{ConfigError, ProviderError, SessionError};
pub use provider::{ChallengeProvider, FallbackPolicy, GeminiProvider, StaticProvider};
pub use session::{
    FocusAdvance, LoadOutcome, LoadTicket, RoundReport, SessionController, SessionLoopService,
    SessionPhase, SharedSession,
};
