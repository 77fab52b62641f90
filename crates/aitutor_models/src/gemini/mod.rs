//! Gemini REST integration.
//!
//! [`GeminiClient`] implements both the generative backend and the file
//! uploader capabilities over `generativelanguage.googleapis.com`.

mod client;
mod config;
pub mod conversions;
mod dto;
mod upload;

pub use client::GeminiClient;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiConfig,
    GeminiConfigBuilder,
};
pub use dto::{
    Candidate, Content, FileData, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, InlineData, Part, UploadFileResponse, UploadedFile,
};
pub use upload::guess_mime_type;
