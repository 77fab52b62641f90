//! Built-in template table and lookup.

use crate::{FieldSpec, Modality, ResponseSchema, Template, TemplateConfig, Topic};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::debug;

/// Tutor persona shared by the task-specific templates.
pub const AI_TUTOR_INSTRUCTION: &str = "You are an experienced and friendly private tutor who helps \
students understand a wide variety of subjects, including English, Math, Filipino, History, and Science. \
You explain concepts clearly, adapt to the student's level of understanding, and provide examples when \
necessary. Always respond in a supportive, educational tone.

When answering:
- Use simple language appropriate to the student's level.
- Break down complex ideas into understandable parts.
- Offer examples or analogies to clarify points.
- Encourage curiosity and deeper thinking.
- If asked to explain in Filipino, do so fluently and appropriately.

Always ask if the student wants further explanation, and avoid giving just direct \
answers. Prioritize understanding and learning.";

const GENERATE_TITLE_TASK: &str = "For this task you are expected to generate a title / name \
(short and catchy) for the following text. And choose the right topic.";
const SUMMARIZE_TASK: &str = "For this task you are expected to summarize the following text.";
const EXPLAIN_LIKE_IM_5_TASK: &str =
    "For this task you are expected to explain the following text like I am a 5 year old.";
const MULTIPLE_CHOICE_TASK: &str = "For this task you are expected to generate a multiple choice \
question with 4 options based on the following text.";

/// Adjustments to a built-in template loaded from settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateOverride {
    /// Replacement maximum output tokens
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    /// Replacement sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Replacement system instruction
    #[serde(default)]
    pub system_instruction: Option<String>,
}

/// Immutable table from template to generation configuration.
///
/// Lookups never fail: anything unknown resolves to the `default` entry.
///
/// # Examples
///
/// ```
/// use aitutor_core::{Template, TemplateRegistry};
///
/// let registry = TemplateRegistry::builtin();
/// assert!(registry.get(Template::GenerateImage).is_image());
/// assert_eq!(
///     registry.get_by_name(Some("no-such-template")),
///     registry.get(Template::Default)
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRegistry {
    configs: HashMap<Template, TemplateConfig>,
    fallback: TemplateConfig,
}

impl TemplateRegistry {
    /// The built-in table.
    pub fn builtin() -> Self {
        let configs = Template::iter()
            .map(|template| (template, builtin_config(template)))
            .collect();
        Self {
            configs,
            fallback: builtin_config(Template::Default),
        }
    }

    /// Returns a registry with `overrides` applied on top of this one.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (Template, TemplateOverride)>,
    {
        for (template, adjustment) in overrides {
            debug!(template = %template, ?adjustment, "Applying template override");
            let updated = self.get(template).overridden(
                adjustment.max_output_tokens,
                adjustment.temperature,
                adjustment.system_instruction,
            );
            if template == Template::Default {
                self.fallback = updated.clone();
            }
            self.configs.insert(template, updated);
        }
        self
    }

    /// Configuration for `template`.
    pub fn get(&self, template: Template) -> &TemplateConfig {
        self.configs.get(&template).unwrap_or(&self.fallback)
    }

    /// Configuration for a template given by name, `default` when unknown or absent.
    pub fn get_by_name(&self, name: Option<&str>) -> &TemplateConfig {
        self.get(Template::from_optional_name(name))
    }

    /// All templates with their configuration, in declaration order.
    pub fn templates(&self) -> impl Iterator<Item = (Template, &TemplateConfig)> + '_ {
        Template::iter().map(move |template| (template, self.get(template)))
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tutor_task(task: &str) -> Option<String> {
    Some(format!("{AI_TUTOR_INSTRUCTION}\n\n{task}"))
}

fn builtin_config(template: Template) -> TemplateConfig {
    match template {
        Template::Default => TemplateConfig::new(
            Some(1024),
            Some(0.7),
            None,
            ResponseSchema::text_object(),
            Modality::Text,
        ),
        Template::Tutor => TemplateConfig::new(
            None,
            None,
            Some(AI_TUTOR_INSTRUCTION.to_string()),
            ResponseSchema::text_object(),
            Modality::Text,
        ),
        Template::GenerateTitle => TemplateConfig::new(
            Some(128),
            Some(0.8),
            tutor_task(GENERATE_TITLE_TASK),
            ResponseSchema::Object(vec![
                FieldSpec::string("name"),
                FieldSpec::one_of("topic", Topic::iter().map(|topic| topic.to_string())),
            ]),
            Modality::Text,
        ),
        Template::Summarize => TemplateConfig::new(
            Some(512),
            Some(0.3),
            tutor_task(SUMMARIZE_TASK),
            ResponseSchema::text_object(),
            Modality::Text,
        ),
        Template::ExplainLikeIm5 => TemplateConfig::new(
            Some(512),
            Some(0.2),
            tutor_task(EXPLAIN_LIKE_IM_5_TASK),
            ResponseSchema::text_object(),
            Modality::Text,
        ),
        Template::MultipleChoiceQuestion => TemplateConfig::new(
            Some(1024),
            Some(0.4),
            tutor_task(MULTIPLE_CHOICE_TASK),
            ResponseSchema::Array(vec![
                FieldSpec::string("question"),
                FieldSpec::string("answer"),
                FieldSpec::string_list("options"),
            ]),
            Modality::Text,
        ),
        Template::GenerateImage => TemplateConfig::new(
            None,
            None,
            None,
            ResponseSchema::Image,
            Modality::TextAndImage,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_generate_image_is_image_modality() {
        let registry = TemplateRegistry::builtin();
        for (template, config) in registry.templates() {
            assert_eq!(config.is_image(), template == Template::GenerateImage);
        }
    }

    #[test]
    fn test_unrecognized_names_resolve_to_default() {
        let registry = TemplateRegistry::builtin();
        let default = registry.get(Template::Default);
        for name in ["", "   ", "Tutorial", "generate image", "summarise", "42"] {
            assert_eq!(registry.get_by_name(Some(name)), default, "name: {name:?}");
        }
        assert_eq!(registry.get_by_name(None), default);
    }

    #[test]
    fn test_generate_title_constrains_topic() {
        let registry = TemplateRegistry::builtin();
        let schema = registry.get(Template::GenerateTitle).schema();
        assert!(schema.parse(r#"{"name": "Cells 101", "topic": "science"}"#).is_ok());
        assert!(schema.parse(r#"{"name": "Cells 101", "topic": "biology"}"#).is_err());
    }

    #[test]
    fn test_task_templates_carry_the_tutor_persona() {
        let registry = TemplateRegistry::builtin();
        for template in [
            Template::Tutor,
            Template::Summarize,
            Template::GenerateTitle,
            Template::ExplainLikeIm5,
            Template::MultipleChoiceQuestion,
        ] {
            let instruction = registry.get(template).system_instruction().as_deref();
            assert!(instruction.is_some_and(|text| text.starts_with(AI_TUTOR_INSTRUCTION)));
        }
        assert!(registry.get(Template::Default).system_instruction().is_none());
    }

    #[test]
    fn test_overrides_adjust_limits_but_keep_schema() {
        let registry = TemplateRegistry::builtin().with_overrides([(
            Template::Summarize,
            TemplateOverride {
                max_output_tokens: Some(2048),
                temperature: None,
                system_instruction: None,
            },
        )]);
        let config = registry.get(Template::Summarize);
        assert_eq!(*config.max_output_tokens(), Some(2048));
        assert_eq!(*config.temperature(), Some(0.3));
        assert_eq!(config.schema(), &ResponseSchema::text_object());
    }

    #[test]
    fn test_default_override_also_updates_fallback() {
        let registry = TemplateRegistry::builtin().with_overrides([(
            Template::Default,
            TemplateOverride {
                temperature: Some(0.1),
                ..TemplateOverride::default()
            },
        )]);
        assert_eq!(*registry.get_by_name(Some("unknown")).temperature(), Some(0.1));
    }
}
