use async_trait::async_trait;
use rand::seq::IndexedRandom;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use conjugaison_core::model::{Challenge, Tense, TenseSelection};

use crate::config::{ProviderConfig, ProviderConfigDraft};
use crate::error::{ConfigError, ProviderError};

use super::ChallengeProvider;
use super::prompt::{build_prompt, parse_challenge, response_schema};

/// Generates challenges through the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    config: Option<ProviderConfig>,
}

impl GeminiProvider {
    /// # Errors
    ///
    /// Returns `ConfigError` if the environment holds an invalid base URL or model.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(ProviderConfigDraft::from_env().validate()?))
    }

    #[must_use]
    pub fn new(config: Option<ProviderConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("enabled", &self.enabled())
            .field("model", &self.config.as_ref().map(ProviderConfig::model))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChallengeProvider for GeminiProvider {
    async fn generate_challenge(
        &self,
        tenses: &TenseSelection,
    ) -> Result<Challenge, ProviderError> {
        let config = self.config.as_ref().ok_or(ProviderError::Disabled)?;

        let tense = pick_tense(tenses);
        debug!(model = config.model(), tense = tense.label(), "requesting challenge");

        let payload = GenerateRequest {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart {
                    text: build_prompt(tenses, tense),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let response = self
            .client
            .post(config.request_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::Quota);
        }
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status));
        }

        let raw = response.text().await?;
        let text = extract_text(&raw)?;
        parse_challenge(&text)
    }
}

/// Pull the generated text out of a raw `generateContent` body.
fn extract_text(raw: &str) -> Result<String, ProviderError> {
    let body: GenerateResponse = serde_json::from_str(raw)?;
    body.first_text().ok_or(ProviderError::EmptyResponse)
}

// The selection is never empty, so the default only satisfies the type.
fn pick_tense(tenses: &TenseSelection) -> Tense {
    tenses
        .as_slice()
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(Tense::Present)
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
