//! The prompt response generator.

use crate::{AttachmentResolver, to_turns};
use aitutor_core::{
    BackendOutput, GenerationOutcome, InvocationRequest, PromptRequest, PromptResponse,
    TemplateConfig, TemplateRegistry,
};
use aitutor_error::{PromptError, PromptErrorKind};
use aitutor_interface::{FileUploader, GenerativeBackend};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "metrics")]
use crate::PromptMetrics;

/// Lifecycle of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum InvocationState {
    /// Request accepted, nothing started
    Idle,
    /// Uploading attachments
    AttachmentsResolving,
    /// Waiting on the generative backend
    BackendInvoking,
    /// Interpreting backend output against the template schema
    ResponseParsing,
    /// Schema-conformant result produced
    Succeeded,
    /// Error marker produced
    Failed,
}

impl From<GenerationOutcome> for InvocationState {
    fn from(outcome: GenerationOutcome) -> Self {
        match outcome {
            GenerationOutcome::Succeeded => Self::Succeeded,
            GenerationOutcome::Failed => Self::Failed,
        }
    }
}

/// Orchestrates template lookup, attachment upload, history replay, the
/// backend call, and response normalization.
///
/// The only error a caller sees is a missing prompt. Every downstream failure
/// becomes the `{"error": "Failed to generate response"}` marker.
pub struct PromptService<B, U> {
    backend: B,
    attachments: AttachmentResolver<U>,
    registry: Arc<TemplateRegistry>,
    #[cfg(feature = "metrics")]
    metrics: PromptMetrics,
}

impl<B, U> PromptService<B, U>
where
    B: GenerativeBackend,
    U: FileUploader,
{
    /// Creates a service over a backend, an uploader, and a template table.
    pub fn new(backend: B, uploader: U, registry: Arc<TemplateRegistry>) -> Self {
        Self {
            backend,
            attachments: AttachmentResolver::new(uploader),
            registry,
            #[cfg(feature = "metrics")]
            metrics: PromptMetrics::new(),
        }
    }

    /// Records into `metrics` instead of the global meter provider.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, metrics: PromptMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The generative backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The template table shared with the backend.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Generates a response for one prompt.
    ///
    /// # Errors
    ///
    /// Returns [`PromptErrorKind::EmptyInput`] when the user input is absent,
    /// empty, or whitespace only. No upload or backend call is made in that
    /// case.
    #[instrument(
        name = "prompt_service.generate_response",
        skip_all,
        fields(
            template,
            provider = self.backend.provider_name(),
            attachments = request.attachment_urls().len(),
            history = request.history().len(),
        )
    )]
    pub async fn generate_response(
        &self,
        request: &PromptRequest,
    ) -> Result<PromptResponse, PromptError> {
        let prompt = match request.user_input() {
            Some(input) if !input.trim().is_empty() => input.as_str(),
            _ => {
                warn!("Rejecting request without user input");
                return Err(PromptError::new(PromptErrorKind::EmptyInput));
            }
        };

        let template = request.template().unwrap_or_default();
        tracing::Span::current().record("template", tracing::field::display(template));
        let config = self.registry.get(template);

        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        let mut state = InvocationState::Idle;
        advance(&mut state, InvocationState::AttachmentsResolving);
        let attachments = self.attachments.resolve(request.attachment_urls()).await;
        let history = to_turns(request.history());

        advance(&mut state, InvocationState::BackendInvoking);
        let invocation = InvocationRequest::new(prompt, attachments, template, history);
        let output = self.backend.invoke(&invocation).await;

        advance(&mut state, InvocationState::ResponseParsing);
        let response = interpret(config, output);

        let terminal = InvocationState::from(response.outcome());
        advance(&mut state, terminal);
        match terminal {
            InvocationState::Succeeded => info!(%template, "Generated response"),
            _ => warn!(%template, "Generation failed, returning error marker"),
        }

        #[cfg(feature = "metrics")]
        self.metrics.record(
            &template.to_string(),
            &response.outcome().to_string(),
            started.elapsed().as_secs_f64(),
        );

        Ok(response)
    }
}

impl<B, U> std::fmt::Debug for PromptService<B, U>
where
    B: GenerativeBackend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptService")
            .field("provider", &self.backend.provider_name())
            .field("model", &self.backend.model_name())
            .finish_non_exhaustive()
    }
}

fn advance(state: &mut InvocationState, next: InvocationState) {
    debug!(from = %state, to = %next, "Invocation state transition");
    *state = next;
}

/// Turns raw backend output into a caller-facing result.
fn interpret(config: &TemplateConfig, output: BackendOutput) -> PromptResponse {
    if output.is_empty_for(*config.modality()) {
        warn!(modality = %config.modality(), "Backend returned no usable output");
        return PromptResponse::failed();
    }

    let (text, image) = output.into_parts();
    if config.is_image() {
        return PromptResponse::new(Value::Null, image);
    }

    match config.schema().parse(&text) {
        Ok(value) => PromptResponse::new(value, String::new()),
        Err(violation) => {
            warn!(%violation, "Backend output does not match the template schema");
            PromptResponse::failed()
        }
    }
}
