use std::env;

use url::{Url, form_urlencoded};

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Connection settings for the generative model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    api_key: String,
    base_url: String,
    model: String,
}

/// Raw settings as read from the environment or the command line.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfigDraft {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl ProviderConfigDraft {
    /// Read `CONJUGAISON_API_KEY` (or `GEMINI_API_KEY`), `CONJUGAISON_BASE_URL`
    /// and `CONJUGAISON_MODEL`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var("CONJUGAISON_API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok();
        Self {
            api_key,
            base_url: env::var("CONJUGAISON_BASE_URL").ok(),
            model: env::var("CONJUGAISON_MODEL").ok(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Normalize the draft. A missing or blank API key yields `Ok(None)`: the provider
    /// stays disabled and every round is served from the fallback.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL does not parse or the model is blank.
    pub fn validate(self) -> Result<Option<ProviderConfig>, ConfigError> {
        let base_url = normalize_optional(self.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        if Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl(base_url));
        }

        let model = match self.model {
            Some(model) => normalize_optional(Some(model)).ok_or(ConfigError::EmptyModel)?,
            None => DEFAULT_MODEL.into(),
        };

        let Some(api_key) = normalize_optional(self.api_key) else {
            return Ok(None);
        };

        Ok(Some(ProviderConfig {
            api_key,
            base_url,
            model,
        }))
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint for a single `generateContent` call.
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// `generate_url` with the API key attached as the `key` query parameter.
    #[must_use]
    pub fn request_url(&self) -> String {
        let key: String = form_urlencoded::byte_serialize(self.api_key.as_bytes()).collect();
        format!("{}?key={key}", self.generate_url())
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_disables_provider() {
        let config = ProviderConfigDraft::default().validate().unwrap();
        assert!(config.is_none());

        let draft = ProviderConfigDraft {
            api_key: Some("   ".into()),
            ..ProviderConfigDraft::default()
        };
        assert!(draft.validate().unwrap().is_none());
    }

    #[test]
    fn defaults_fill_base_url_and_model() {
        let draft = ProviderConfigDraft {
            api_key: Some(" secret ".into()),
            ..ProviderConfigDraft::default()
        };
        let config = draft.validate().unwrap().unwrap();
        assert_eq!(config.api_key(), "secret");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(
            config.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let draft = ProviderConfigDraft {
            api_key: Some("secret".into()),
            base_url: Some("not a url".into()),
            model: None,
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ConfigError::InvalidBaseUrl("not a url".into())
        );
    }

    #[test]
    fn blank_model_is_rejected() {
        let draft = ProviderConfigDraft::default().with_model("  ");
        assert_eq!(draft.validate().unwrap_err(), ConfigError::EmptyModel);
    }

    #[test]
    fn request_url_carries_encoded_key() {
        let draft = ProviderConfigDraft {
            api_key: Some("a b&c".into()),
            base_url: Some("http://localhost:8080/v1".into()),
            model: Some("test-model".into()),
        };
        let config = draft.validate().unwrap().unwrap();
        assert_eq!(
            config.request_url(),
            "http://localhost:8080/v1/models/test-model:generateContent?key=a+b%26c"
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let draft = ProviderConfigDraft {
            api_key: Some("k".into()),
            base_url: Some("http://localhost:8080/v1/".into()),
            model: Some("test-model".into()),
        };
        let config = draft.validate().unwrap().unwrap();
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1/models/test-model:generateContent"
        );
    }
}
