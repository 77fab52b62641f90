//! TOML settings for the command-line front end.

use aitutor_core::{Template, TemplateOverride, TemplateRegistry};
use aitutor_error::{ConfigError, ConfigErrorKind};
use aitutor_models::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, instrument};

/// Default directory for generated images.
pub const DEFAULT_IMAGE_DIR: &str = "public/images";

/// Settings loaded from a TOML file.
///
/// Every section is optional:
///
/// ```toml
/// [gemini]
/// text_model = "gemini-2.0-flash"
/// image_model = "gemini-2.0-flash-preview-image-generation"
/// timeout_secs = 60
///
/// [templates.summarize]
/// max_output_tokens = 256
/// temperature = 0.2
///
/// [images]
/// dir = "public/images"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Provider connection settings
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// Per-template overrides keyed by template name
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateOverride>,
    /// Generated image storage
    #[serde(default)]
    pub images: ImageSettings,
}

/// Gemini model and timeout overrides. The API key only comes from the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// Model for textual templates
    #[serde(default)]
    pub text_model: Option<String>,
    /// Model for image templates
    #[serde(default)]
    pub image_model: Option<String>,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Where generated images are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    /// Output directory
    #[serde(default = "default_image_dir")]
    pub dir: PathBuf,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            dir: default_image_dir(),
        }
    }
}

fn default_image_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_DIR)
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings TOML.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(ConfigErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        let settings: Self = contents.parse()?;
        debug!(
            overrides = settings.templates.len(),
            image_dir = %settings.images.dir.display(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Template overrides keyed by their resolved template.
    ///
    /// Unlike request-time lookups, an unknown name here is a configuration
    /// mistake and is reported rather than mapped to `default`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown template.
    pub fn template_overrides(&self) -> Result<Vec<(Template, TemplateOverride)>, ConfigError> {
        self.templates
            .iter()
            .map(|(name, adjustment)| {
                let template = Template::from_str(&name.trim().to_ascii_lowercase())
                    .map_err(|_| {
                        ConfigError::new(ConfigErrorKind::UnknownTemplate(name.clone()))
                    })?;
                Ok((template, adjustment.clone()))
            })
            .collect()
    }

    /// The built-in registry with this file's overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if an override names an unknown template.
    pub fn registry(&self) -> Result<TemplateRegistry, ConfigError> {
        Ok(TemplateRegistry::builtin().with_overrides(self.template_overrides()?))
    }

    /// Applies the `[gemini]` section on top of an environment-derived config.
    pub fn apply_to(&self, config: GeminiConfig) -> GeminiConfig {
        let config = config.with_models(
            self.gemini.text_model.clone(),
            self.gemini.image_model.clone(),
        );
        match self.gemini.timeout_secs {
            Some(secs) => config.with_timeout_secs(secs),
            None => config,
        }
    }
}

impl FromStr for Settings {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
    }
}
