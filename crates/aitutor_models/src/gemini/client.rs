//! Gemini REST client.

use crate::gemini::{
    GeminiConfig, GenerateContentRequest, GenerateContentResponse, conversions,
};
use aitutor_core::{BackendOutput, InvocationRequest, TemplateConfig, TemplateRegistry};
use aitutor_error::{AitutorResult, GeminiError, GeminiErrorKind};
use aitutor_interface::GenerativeBackend;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

pub(crate) const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini backend over the public REST API.
///
/// Holds the shared template registry so each invocation is configured from
/// its template alone. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub(crate) http: Client,
    pub(crate) config: GeminiConfig,
    registry: Arc<TemplateRegistry>,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    #[instrument(skip_all, fields(text_model = %config.text_model(), image_model = %config.image_model()))]
    pub fn new(config: GeminiConfig, registry: Arc<TemplateRegistry>) -> AitutorResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(*config.timeout_secs()))
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(base_url = %config.base_url(), "Created Gemini client");

        Ok(Self {
            http,
            config,
            registry,
        })
    }

    /// Creates a client configured from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is set.
    pub fn from_env(registry: Arc<TemplateRegistry>) -> AitutorResult<Self> {
        Self::new(GeminiConfig::from_env()?, registry)
    }

    /// Connection settings.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Model variant for a template: the image model when it produces images.
    pub fn model_for(&self, template_config: &TemplateConfig) -> &str {
        if template_config.is_image() {
            self.config.image_model()
        } else {
            self.config.text_model()
        }
    }

    /// Calls `models/{model}:generateContent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body cannot be decoded.
    #[instrument(skip(self, body), fields(model = %model, contents = body.contents.len()))]
    pub async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> AitutorResult<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url(),
            model
        );

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ResponseParse(e.to_string())))?;

        debug!(candidates = parsed.candidates.len(), "Received response");
        Ok(parsed)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    #[instrument(
        skip(self, request),
        fields(
            template = %request.template(),
            history = request.history().len(),
            attachments = request.attachments().len()
        )
    )]
    async fn invoke(&self, request: &InvocationRequest) -> BackendOutput {
        let template_config = self.registry.get(*request.template());
        let model = self.model_for(template_config);
        let body = conversions::to_generate_request(request, template_config);

        info!(model, "Invoking Gemini");
        match self.generate_content(model, &body).await {
            Ok(response) => {
                let output = conversions::to_backend_output(&response, *template_config.modality());
                debug!(
                    text_len = output.text().len(),
                    image_len = output.image().len(),
                    "Generated response"
                );
                output
            }
            Err(e) => {
                error!(model, error = %e, "Gemini generation failed");
                BackendOutput::empty()
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.text_model()
    }
}
