//! Error types for the aitutor library.
//!
//! Every error records the source line and file where it was created, and
//! converts into the crate-level [`AitutorError`].

mod config;
mod gemini;
mod prompt;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use prompt::{PromptError, PromptErrorKind};
pub use storage::{StorageError, StorageErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum AitutorErrorKind {
    /// Gemini provider error
    Gemini(GeminiError),
    /// Caller contract violation
    Prompt(PromptError),
    /// Configuration error
    Config(ConfigError),
    /// Generated media storage error
    Storage(StorageError),
}

impl std::fmt::Display for AitutorErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AitutorErrorKind::Gemini(e) => write!(f, "{}", e),
            AitutorErrorKind::Prompt(e) => write!(f, "{}", e),
            AitutorErrorKind::Config(e) => write!(f, "{}", e),
            AitutorErrorKind::Storage(e) => write!(f, "{}", e),
        }
    }
}

/// Aitutor error with kind discrimination.
#[derive(Debug)]
pub struct AitutorError(Box<AitutorErrorKind>);

impl AitutorError {
    /// Create a new error from a kind.
    pub fn new(kind: AitutorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AitutorErrorKind {
        &self.0
    }
}

impl std::fmt::Display for AitutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Aitutor Error: {}", self.0)
    }
}

impl std::error::Error for AitutorError {}

impl<T> From<T> for AitutorError
where
    T: Into<AitutorErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for aitutor operations.
pub type AitutorResult<T> = std::result::Result<T, AitutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_caller_location() {
        let err = GeminiError::new(GeminiErrorKind::ApiRequest("timeout".to_string()));
        assert!(err.file.ends_with("lib.rs"));
        assert!(err.line > 0);
    }

    #[test]
    fn test_kind_converts_into_crate_error() {
        let err: AitutorError = PromptError::new(PromptErrorKind::EmptyInput).into();
        assert!(matches!(err.kind(), AitutorErrorKind::Prompt(_)));
        assert!(err.to_string().starts_with("Aitutor Error: Prompt Error"));
    }

    #[test]
    fn test_http_error_display_includes_status() {
        let err = GeminiError::new(GeminiErrorKind::HttpError {
            status_code: 429,
            message: "quota".to_string(),
        });
        assert!(err.to_string().contains("HTTP 429 error: quota"));
    }

    #[test]
    fn test_config_error_converts_into_crate_error() {
        let err: AitutorError =
            ConfigError::new(ConfigErrorKind::Parse("expected `]`".to_string())).into();
        assert!(matches!(err.kind(), AitutorErrorKind::Config(_)));
        assert!(err.to_string().contains("Invalid settings: expected `]`"));
    }
}
