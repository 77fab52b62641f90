//! Per-template generation configuration.

use crate::ResponseSchema;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Output modalities a template asks the provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Modality {
    /// Text only
    #[default]
    Text,
    /// Text and inline images
    TextAndImage,
}

/// Generation settings bound to one template.
///
/// # Examples
///
/// ```
/// use aitutor_core::{Modality, ResponseSchema, TemplateConfig};
///
/// let config = TemplateConfig::builder()
///     .max_output_tokens(Some(512))
///     .temperature(Some(0.3))
///     .schema(ResponseSchema::text_object())
///     .build()
///     .expect("valid config");
///
/// assert_eq!(*config.modality(), Modality::Text);
/// assert!(!config.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct TemplateConfig {
    /// Maximum output tokens, provider default when unset
    #[builder(default)]
    max_output_tokens: Option<u32>,
    /// Sampling temperature, provider default when unset
    #[builder(default)]
    temperature: Option<f32>,
    /// System instruction sent with every request
    #[builder(default)]
    system_instruction: Option<String>,
    /// Expected response shape
    schema: ResponseSchema,
    /// Requested output modalities
    #[builder(default)]
    modality: Modality,
}

impl TemplateConfig {
    /// Creates a configuration from its parts.
    pub fn new(
        max_output_tokens: Option<u32>,
        temperature: Option<f32>,
        system_instruction: Option<String>,
        schema: ResponseSchema,
        modality: Modality,
    ) -> Self {
        Self {
            max_output_tokens,
            temperature,
            system_instruction,
            schema,
            modality,
        }
    }

    /// Creates a builder for TemplateConfig.
    pub fn builder() -> TemplateConfigBuilder {
        TemplateConfigBuilder::default()
    }

    /// Whether the template produces an image.
    pub fn is_image(&self) -> bool {
        self.modality == Modality::TextAndImage
    }

    /// Returns a copy with the given overrides applied.
    ///
    /// Schema and modality are fixed per template and never overridden.
    pub fn overridden(
        &self,
        max_output_tokens: Option<u32>,
        temperature: Option<f32>,
        system_instruction: Option<String>,
    ) -> Self {
        Self {
            max_output_tokens: max_output_tokens.or(self.max_output_tokens),
            temperature: temperature.or(self.temperature),
            system_instruction: system_instruction.or_else(|| self.system_instruction.clone()),
            schema: self.schema.clone(),
            modality: self.modality,
        }
    }
}
