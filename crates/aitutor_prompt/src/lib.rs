//! Prompt orchestration for the aitutor library.
//!
//! [`PromptService`] ties the pieces together: it looks up the template
//! configuration, uploads attachments through an [`AttachmentResolver`],
//! replays prior exchanges with [`to_turns`], calls a
//! [`GenerativeBackend`](aitutor_interface::GenerativeBackend), and normalizes
//! the output against the template's response schema.

mod attachments;
mod history;
#[cfg(feature = "metrics")]
mod metrics;
mod service;

pub use attachments::AttachmentResolver;
pub use history::to_turns;
#[cfg(feature = "metrics")]
pub use metrics::PromptMetrics;
pub use service::{InvocationState, PromptService};
