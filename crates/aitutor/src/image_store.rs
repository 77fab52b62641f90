//! Storage for generated images.

use aitutor_error::{StorageError, StorageErrorKind};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, instrument};

/// Public URL prefix under which stored images are served.
pub const PUBLIC_IMAGE_PREFIX: &str = "/public/images";

/// Attempts at a free file name within one millisecond.
const MAX_NAME_ATTEMPTS: u32 = 100;

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/\w+;base64,").expect("Invalid data URL regex"));

/// Writes base64 images to a directory and hands back their public path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Creates a store writing into `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Decodes and writes one image, returning `/public/images/<file>`.
    ///
    /// The payload may carry a `data:image/<kind>;base64,` header.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is empty or not base64, or the file
    /// cannot be written.
    #[instrument(skip_all, fields(dir = %self.dir.display(), len = image.len()))]
    pub async fn save(&self, image: &str) -> Result<String, StorageError> {
        let payload = DATA_URL_PREFIX.replace(image.trim(), "");
        if payload.is_empty() {
            return Err(StorageError::new(StorageErrorKind::EmptyPayload));
        }

        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| StorageError::new(StorageErrorKind::Decode(e.to_string())))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;

        let stamp = chrono::Utc::now().timestamp_millis();
        let (file_name, mut file) = self.create_unique(stamp).await?;
        file.write_all(&bytes)
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;
        file.flush()
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;

        let public_path = format!("{}/{}", PUBLIC_IMAGE_PREFIX, file_name);
        info!(path = %public_path, "Saved generated image");
        Ok(public_path)
    }

    /// Creates `<stamp>-ai-image.png`, or `<stamp>-<n>-ai-image.png` when taken.
    async fn create_unique(&self, stamp: i64) -> Result<(String, tokio::fs::File), StorageError> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = match attempt {
                0 => format!("{}-ai-image.png", stamp),
                n => format!("{}-{}-ai-image.png", stamp, n),
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&file_name))
                .await
            {
                Ok(file) => return Ok((file_name, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    debug!(file_name, "Image name taken, trying the next suffix");
                }
                Err(e) => return Err(StorageError::new(StorageErrorKind::Io(e.to_string()))),
            }
        }
        Err(StorageError::new(StorageErrorKind::Io(format!(
            "No free image name for timestamp {}",
            stamp
        ))))
    }

    /// Like [`save`](Self::save), but logs failures and returns `None`.
    pub async fn store(&self, image: &str) -> Option<String> {
        match self.save(image).await {
            Ok(path) => Some(path),
            Err(e) => {
                error!(error = %e, "Failed to save generated image");
                None
            }
        }
    }
}
