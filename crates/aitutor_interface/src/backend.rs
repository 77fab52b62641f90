//! Generative backend capability.

use aitutor_core::{BackendOutput, InvocationRequest};
use async_trait::async_trait;

/// A provider that turns a normalized invocation into text or image output.
///
/// Implementations select the model variant from the template's modality,
/// prime a session with the request history, and send the prompt plus
/// attachments as the next user turn.
///
/// Provider failures never cross this boundary: implementations log them and
/// return [`BackendOutput::empty`], which the orchestrator reports as a failed
/// generation.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Runs one generation.
    async fn invoke(&self, request: &InvocationRequest) -> BackendOutput;

    /// Provider name for logging.
    fn provider_name(&self) -> &'static str;

    /// Model used for text templates.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: GenerativeBackend + ?Sized> GenerativeBackend for std::sync::Arc<T> {
    async fn invoke(&self, request: &InvocationRequest) -> BackendOutput {
        (**self).invoke(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
