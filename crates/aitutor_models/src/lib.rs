//! Generative provider integrations for aitutor.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
