//! Settings file error types.

/// What went wrong while loading settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The settings file could not be read
    #[display("Failed to read '{}': {}", path, message)]
    Read {
        /// Settings file path
        path: String,
        /// I/O error message
        message: String,
    },
    /// The contents are not valid settings TOML
    #[display("Invalid settings: {}", _0)]
    Parse(String),
    /// A `[templates.<name>]` section names no known template
    #[display("Unknown template '{}' in [templates]", _0)]
    UnknownTemplate(String),
}

/// Settings error with location tracking.
///
/// # Examples
///
/// ```
/// use aitutor_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::UnknownTemplate("quiz".to_string()));
/// assert!(format!("{}", err).contains("Unknown template 'quiz'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
