//! Trait definitions for the aitutor prompt orchestration library.
//!
//! The prompt service is written against these capabilities so that provider
//! adapters and test doubles are interchangeable.

mod backend;
mod uploader;

pub use backend::GenerativeBackend;
pub use uploader::FileUploader;
