//! Normalized results handed back to callers.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Message placed in the error marker when generation fails.
pub const FAILED_TO_GENERATE: &str = "Failed to generate response";

/// Terminal state of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationOutcome {
    /// The response conforms to the template's schema
    Succeeded,
    /// The response is the error marker
    Failed,
}

/// Result of a prompt: a schema-conformant payload or the error marker.
///
/// Soft failures are values, not errors: callers inspect [`is_error`] to tell
/// them apart.
///
/// [`is_error`]: PromptResponse::is_error
///
/// # Examples
///
/// ```
/// use aitutor_core::{GenerationOutcome, PromptResponse};
///
/// let failed = PromptResponse::failed();
/// assert!(failed.is_error());
/// assert_eq!(failed.outcome(), GenerationOutcome::Failed);
/// assert!(failed.image().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PromptResponse {
    /// Parsed payload, `null` for image templates
    response: Value,
    /// Base64 image, empty unless the template generates images
    image: String,
}

impl PromptResponse {
    /// A successful result.
    pub fn new(response: Value, image: impl Into<String>) -> Self {
        Self {
            response,
            image: image.into(),
        }
    }

    /// The error-marker result.
    pub fn failed() -> Self {
        Self {
            response: json!({ "error": FAILED_TO_GENERATE }),
            image: String::new(),
        }
    }

    /// Whether this is the error marker.
    pub fn is_error(&self) -> bool {
        self.response
            .as_object()
            .is_some_and(|map| map.len() == 1 && map.contains_key("error"))
    }

    /// Terminal state this result represents.
    pub fn outcome(&self) -> GenerationOutcome {
        if self.is_error() {
            GenerationOutcome::Failed
        } else {
            GenerationOutcome::Succeeded
        }
    }

    /// Splits the result into payload and image.
    pub fn into_parts(self) -> (Value, String) {
        (self.response, self.image)
    }
}
