//! Provider file store capability.

use aitutor_core::AttachmentHandle;
use aitutor_error::AitutorResult;
use async_trait::async_trait;

/// Uploads a file referenced by URL or path to a provider's file store.
#[async_trait]
pub trait FileUploader: Send + Sync {
    /// Uploads one attachment and returns its provider handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be fetched or the provider rejects
    /// the upload.
    async fn upload(&self, url: &str) -> AitutorResult<AttachmentHandle>;
}

#[async_trait]
impl<T: FileUploader + ?Sized> FileUploader for std::sync::Arc<T> {
    async fn upload(&self, url: &str) -> AitutorResult<AttachmentHandle> {
        (**self).upload(url).await
    }
}
