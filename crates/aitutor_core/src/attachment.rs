//! Provider file handles for uploaded attachments.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Reference to a file already uploaded to the provider's file store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct AttachmentHandle {
    /// Provider URI of the uploaded file
    uri: String,
    /// MIME type reported by the provider
    mime_type: String,
}

impl AttachmentHandle {
    /// Creates a handle from a provider URI and MIME type.
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }
}
