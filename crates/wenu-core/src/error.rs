//! Error types for WenuFilter

/// Result type alias using WenuFilter's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for WenuFilter operations
///
/// Only collaborator failures surface here. Per-event selection outcomes are
/// never errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Event input errors
    #[error("input error: {0}")]
    Input(String),

    /// Output sink errors
    #[error("output sink error: {0}")]
    Sink(String),

    /// Filesystem/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML configuration parse errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new event input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a new output sink error
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }
}
