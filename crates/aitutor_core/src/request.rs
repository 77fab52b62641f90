//! Request types flowing into the orchestrator and the backend adapters.

use crate::{AttachmentHandle, Exchange, Modality, Template, Turn};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What a caller asks the prompt service for.
///
/// # Examples
///
/// ```
/// use aitutor_core::{PromptRequest, Template};
///
/// let request = PromptRequest::builder()
///     .user_input(Some("Explain gravity".to_string()))
///     .template(Some(Template::ExplainLikeIm5))
///     .build()
///     .expect("valid request");
///
/// assert!(request.attachment_urls().is_empty());
/// assert!(request.history().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct PromptRequest {
    /// Student input; required
    user_input: Option<String>,
    /// Attachment URLs or local paths
    #[serde(default)]
    attachment_urls: Vec<String>,
    /// Selected template, `default` when unset
    #[serde(default)]
    template: Option<Template>,
    /// Prior exchanges of the conversation, oldest first
    #[serde(default)]
    history: Vec<Exchange>,
}

impl PromptRequest {
    /// Creates a builder for PromptRequest.
    pub fn builder() -> PromptRequestBuilder {
        PromptRequestBuilder::default()
    }

    /// Shorthand for a request with only user input.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: Some(user_input.into()),
            ..Self::default()
        }
    }
}

/// Normalized request handed to a generative backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct InvocationRequest {
    /// Prompt text for the new user turn
    prompt: String,
    /// Uploaded attachments sent alongside the prompt
    #[builder(default)]
    attachments: Vec<AttachmentHandle>,
    /// Template selecting the generation configuration
    #[builder(default)]
    template: Template,
    /// Turns that prime the session, oldest first
    #[builder(default)]
    history: Vec<Turn>,
}

impl InvocationRequest {
    /// Creates a builder for InvocationRequest.
    pub fn builder() -> InvocationRequestBuilder {
        InvocationRequestBuilder::default()
    }

    /// Creates an invocation from its parts.
    pub fn new(
        prompt: impl Into<String>,
        attachments: Vec<AttachmentHandle>,
        template: Template,
        history: Vec<Turn>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            attachments,
            template,
            history,
        }
    }
}

/// Raw text and image produced by a backend. Both are empty on failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct BackendOutput {
    /// Trimmed textual output
    text: String,
    /// Base64-encoded image bytes
    image: String,
}

impl BackendOutput {
    /// Creates an output from text and image payloads.
    pub fn new(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: image.into(),
        }
    }

    /// A text-only output.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, String::new())
    }

    /// The empty output returned when generation failed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the channel that matters for `modality` carries nothing.
    pub fn is_empty_for(&self, modality: Modality) -> bool {
        match modality {
            Modality::Text => self.text.is_empty(),
            Modality::TextAndImage => self.image.is_empty(),
        }
    }

    /// Splits the output into text and image.
    pub fn into_parts(self) -> (String, String) {
        (self.text, self.image)
    }
}
