//! Best-effort attachment resolution.

use aitutor_core::AttachmentHandle;
use aitutor_interface::FileUploader;
use futures::future::join_all;
use tracing::{debug, instrument, warn};

/// Uploads attachment URLs, dropping the ones that fail.
///
/// Blank entries are skipped without an upload attempt. Uploads run
/// concurrently; the result keeps input order.
#[derive(Debug, Clone)]
pub struct AttachmentResolver<U> {
    uploader: U,
}

impl<U: FileUploader> AttachmentResolver<U> {
    /// Creates a resolver over an uploader.
    pub fn new(uploader: U) -> Self {
        Self { uploader }
    }

    /// The underlying uploader.
    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    /// Uploads every non-blank URL and returns the handles that succeeded.
    #[instrument(skip_all, fields(requested = urls.len()))]
    pub async fn resolve(&self, urls: &[String]) -> Vec<AttachmentHandle> {
        let uploads = urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(|url| async move {
                match self.uploader.upload(url).await {
                    Ok(handle) => Some(handle),
                    Err(e) => {
                        warn!(url, error = %e, "Dropping attachment that failed to upload");
                        None
                    }
                }
            });

        let handles: Vec<AttachmentHandle> = join_all(uploads).await.into_iter().flatten().collect();
        debug!(resolved = handles.len(), "Resolved attachments");
        handles
    }
}
