//! Template-driven AI tutoring on top of Gemini.
//!
//! This crate re-exports the workspace's public surface and adds the pieces a
//! deployment needs around [`PromptService`]: tracing and metrics setup, TOML
//! [`Settings`], and an [`ImageStore`] for generated images.
//!
//! # Example
//!
//! ```no_run
//! use aitutor::{GeminiClient, PromptRequest, PromptService, Template, TemplateRegistry};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(TemplateRegistry::builtin());
//! let client = GeminiClient::from_env(registry.clone())?;
//! let service = PromptService::new(client.clone(), client, registry);
//!
//! let request = PromptRequest::builder()
//!     .user_input(Some("Why is the sky blue?".to_string()))
//!     .template(Some(Template::ExplainLikeIm5))
//!     .build()?;
//! let result = service.generate_response(&request).await?;
//! println!("{}", result.response());
//! # Ok(())
//! # }
//! ```

mod image_store;
mod observability;
mod settings;

pub use image_store::{ImageStore, PUBLIC_IMAGE_PREFIX};
pub use observability::{init_observability, init_tracing, shutdown_observability};
pub use settings::{DEFAULT_IMAGE_DIR, GeminiSettings, ImageSettings, Settings};

pub use aitutor_core::*;
pub use aitutor_error::*;
pub use aitutor_interface::*;
pub use aitutor_models::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
pub use aitutor_prompt::*;
