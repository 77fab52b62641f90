//! Gemini connection settings.

use aitutor_error::{GeminiError, GeminiErrorKind};
use derive_getters::Getters;

/// Default REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used for text templates.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
/// Model used for image templates.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Gemini REST client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key sent as `x-goog-api-key`
    api_key: String,
    /// Base URL without trailing slash
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Model for text templates
    #[builder(default = "DEFAULT_TEXT_MODEL.to_string()")]
    text_model: String,
    /// Model for image templates
    #[builder(default = "DEFAULT_IMAGE_MODEL.to_string()")]
    image_model: String,
    /// Request timeout in seconds
    #[builder(default = "DEFAULT_TIMEOUT_SECS")]
    timeout_secs: u64,
}

impl GeminiConfig {
    /// Creates a builder for GeminiConfig.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `GEMINI_KEY`, falling back to `GEMINI_API_KEY` (required)
    /// - `GEMINI_BASE_URL` (default: the public endpoint)
    /// - `GEMINI_TEXT_MODEL` (default: "gemini-2.0-flash")
    /// - `GEMINI_IMAGE_MODEL` (default: "gemini-2.0-flash-preview-image-generation")
    /// - `GEMINI_TIMEOUT_SECS` (default: 120)
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        let mut builder = Self::builder();
        builder.api_key(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            builder.base_url(base_url.trim_end_matches('/'));
        }
        if let Ok(model) = std::env::var("GEMINI_TEXT_MODEL") {
            builder.text_model(model);
        }
        if let Ok(model) = std::env::var("GEMINI_IMAGE_MODEL") {
            builder.image_model(model);
        }
        if let Some(secs) = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            builder.timeout_secs(secs);
        }

        builder
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))
    }

    /// Returns a copy using different model names.
    pub fn with_models(mut self, text_model: Option<String>, image_model: Option<String>) -> Self {
        if let Some(model) = text_model {
            self.text_model = model;
        }
        if let Some(model) = image_model {
            self.image_model = model;
        }
        self
    }

    /// Returns a copy with a different request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
