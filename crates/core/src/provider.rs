use crate::error::{KratkoError, Result};

pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";
pub const MODEL_ENV: &str = "HF_MODEL";
pub const BASE_URL_ENV: &str = "HF_API_BASE_URL";

pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Connection settings for the hosted inference endpoint. Shared read-only.
#[derive(Clone)]
pub struct InferenceProvider {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for InferenceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceProvider")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl InferenceProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build from `HUGGINGFACE_API_KEY`, `HF_MODEL` and `HF_API_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = validate_api_key(API_KEY_ENV)?;
        let mut provider = Self::new(api_key);
        if let Ok(model) = std::env::var(MODEL_ENV) {
            provider = provider.with_model(model);
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            provider = provider.with_base_url(base_url);
        }
        Ok(provider)
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

/// Read an API key from the environment, rejecting blank values.
pub fn validate_api_key(env_var: &str) -> Result<String> {
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(KratkoError::MissingApiKey {
            env_var: env_var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let provider = InferenceProvider::new("hf_test")
            .with_model("sshleifer/distilbart-cnn-12-6")
            .with_base_url("http://localhost:9000/models/");

        assert_eq!(
            provider.endpoint(),
            "http://localhost:9000/models/sshleifer/distilbart-cnn-12-6"
        );
    }

    #[test]
    fn default_endpoint_targets_bart() {
        let provider = InferenceProvider::new("hf_test");
        assert_eq!(
            provider.endpoint(),
            "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn"
        );
    }

    #[test]
    fn debug_output_hides_the_key() {
        let provider = InferenceProvider::new("hf_secret");
        assert!(!format!("{provider:?}").contains("hf_secret"));
    }

    #[test]
    fn missing_key_is_reported_by_name() {
        let err = validate_api_key("KRATKO_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        assert!(matches!(err, KratkoError::MissingApiKey { ref env_var } if env_var == "KRATKO_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
