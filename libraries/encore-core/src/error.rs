/// Core error types for Encore
use thiserror::Error;

/// Result type alias using `EncoreError`
pub type Result<T> = std::result::Result<T, EncoreError>;

/// Core error type for Encore
///
/// Out-of-range indices and missing sessions are not errors; the controller
/// treats them as no-ops. Everything here is a real failure that reaches the
/// caller of the operation.
#[derive(Error, Debug)]
pub enum EncoreError {
    /// Playback engine or session failure
    #[error("Engine error: {0}")]
    Engine(String),

    /// Remote control surface failure
    #[error("Remote control error: {0}")]
    Remote(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A session handle was used after it had been released
    #[error("Playback session already released")]
    SessionReleased,

    /// The controller's command loop is no longer running
    #[error("Playlist controller is closed")]
    ControllerClosed,
}

impl EncoreError {
    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a remote control error
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
