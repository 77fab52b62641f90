//! Prompt orchestration error types.

/// Caller contract violations detected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PromptErrorKind {
    /// The user input was absent, empty, or whitespace only
    #[display("User input is required to generate a response")]
    EmptyInput,
}

/// Prompt error with location tracking.
///
/// # Examples
///
/// ```
/// use aitutor_error::{PromptError, PromptErrorKind};
///
/// let err = PromptError::new(PromptErrorKind::EmptyInput);
/// assert!(format!("{}", err).contains("required"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Prompt Error: {} at line {} in {}", kind, line, file)]
pub struct PromptError {
    /// The kind of error that occurred
    pub kind: PromptErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PromptError {
    /// Create a new prompt error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PromptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
