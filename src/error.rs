use thiserror::Error;

/// Unified error type for release-me operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version: {0}")]
    Version(String),

    #[error("Invalid release request: {0}")]
    Release(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Lifecycle script failed: {0}")]
    Hook(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlEdit(#[from] toml_edit::TomlError),
}

/// Convenience type alias for Results in release-me
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create a release request error with context
    pub fn release(msg: impl Into<String>) -> Self {
        ReleaseError::Release(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseError::Manifest(msg.into())
    }

    /// Create a lifecycle script error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        ReleaseError::Hook(msg.into())
    }

    /// Create an external command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        ReleaseError::Command(msg.into())
    }

    /// Whether this error was raised by invalid caller input rather than I/O.
    ///
    /// Invalid input is always detected before the pipeline touches any file.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ReleaseError::Version(_) | ReleaseError::Release(_))
    }
}
