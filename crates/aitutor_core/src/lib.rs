//! Core data types for the aitutor prompt orchestration library.
//!
//! This crate provides the data model shared by the provider adapters and the
//! prompt service: conversation turns, templates and their configuration,
//! response schemas, the template registry, and the request/result types.

mod attachment;
mod config;
mod registry;
mod request;
mod response;
mod role;
mod schema;
mod template;
mod turn;

pub use attachment::AttachmentHandle;
pub use config::{Modality, TemplateConfig, TemplateConfigBuilder};
pub use registry::{AI_TUTOR_INSTRUCTION, TemplateOverride, TemplateRegistry};
pub use request::{
    BackendOutput, InvocationRequest, InvocationRequestBuilder, PromptRequest,
    PromptRequestBuilder,
};
pub use response::{FAILED_TO_GENERATE, GenerationOutcome, PromptResponse};
pub use role::Role;
pub use schema::{FieldKind, FieldSpec, ResponseSchema, SchemaViolation};
pub use template::{Template, Topic};
pub use turn::{Exchange, Turn};
