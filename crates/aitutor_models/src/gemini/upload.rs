//! Attachment upload through the Gemini file API.

use crate::gemini::client::API_KEY_HEADER;
use crate::gemini::{GeminiClient, UploadFileResponse};
use aitutor_core::AttachmentHandle;
use aitutor_error::{AitutorResult, GeminiError, GeminiErrorKind};
use aitutor_interface::FileUploader;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Guesses a MIME type from the extension of a URL or path.
pub fn guess_mime_type(location: &str) -> &'static str {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        _ => FALLBACK_MIME_TYPE,
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

impl GeminiClient {
    /// Reads attachment bytes from a URL or local path, with their MIME type.
    async fn fetch_attachment(&self, location: &str) -> Result<(Vec<u8>, String), GeminiError> {
        let fetch_error = |message: String| {
            GeminiError::new(GeminiErrorKind::AttachmentFetch {
                url: location.to_string(),
                message,
            })
        };

        if !is_remote(location) {
            let bytes = tokio::fs::read(location)
                .await
                .map_err(|e| fetch_error(e.to_string()))?;
            return Ok((bytes, guess_mime_type(location).to_string()));
        }

        let response = self
            .http
            .get(location)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status.as_u16())));
        }

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| guess_mime_type(location).to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        Ok((bytes.to_vec(), mime_type))
    }
}

#[async_trait]
impl FileUploader for GeminiClient {
    #[instrument(skip(self), fields(url = %url))]
    async fn upload(&self, url: &str) -> AitutorResult<AttachmentHandle> {
        let (bytes, mime_type) = self.fetch_attachment(url).await?;
        debug!(bytes = bytes.len(), mime_type = %mime_type, "Fetched attachment");

        let upload_error = |message: String| {
            GeminiError::new(GeminiErrorKind::AttachmentUpload {
                url: url.to_string(),
                message,
            })
        };

        let endpoint = format!(
            "{}/upload/v1beta/files?uploadType=media",
            self.config.base_url()
        );

        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, self.config.api_key())
            .header("X-Goog-Upload-Protocol", "raw")
            .header(CONTENT_TYPE, mime_type.as_str())
            .body(bytes)
            .send()
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upload_error(format!("HTTP {}: {}", status.as_u16(), body)).into());
        }

        let uploaded: UploadFileResponse = response
            .json()
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        debug!(uri = %uploaded.file.uri, "Uploaded attachment");
        Ok(AttachmentHandle::new(
            uploaded.file.uri,
            uploaded.file.mime_type,
        ))
    }
}
