/// Collaborator traits for Encore
///
/// The controller never talks to an audio stack or to the OS notification
/// area directly. Platform bindings (native bridges on mobile, desktop media
/// keys, test fakes) implement these traits.
use crate::error::Result;
use crate::types::{Control, ControlOptions, NowPlaying, PlaybackStatus, RemoteCommand, StatusUpdate};
use async_trait::async_trait;

/// Callback invoked by a session on every status change
pub type StatusCallback = Box<dyn Fn(StatusUpdate) + Send + Sync>;

/// Callback invoked by the surface when a remote command arrives
pub type CommandHandler = Box<dyn Fn() + Send + Sync>;

/// Factory for playback sessions
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    /// Create a session for `uri`
    ///
    /// With `autoplay` set the session starts producing audio as soon as it
    /// is loaded.
    ///
    /// # Errors
    /// Returns an error if the media cannot be opened
    async fn create_session(&self, uri: &str, autoplay: bool) -> Result<Box<dyn PlaybackSession>>;
}

/// One live decode/playback instance for a single track
#[async_trait]
pub trait PlaybackSession: Send + Sync {
    /// Resume playback
    async fn play(&self) -> Result<()>;

    /// Pause playback
    async fn pause(&self) -> Result<()>;

    /// Stop playback and rewind
    async fn stop(&self) -> Result<()>;

    /// Move the playhead to `position_ms`
    async fn seek_to(&self, position_ms: u64) -> Result<()>;

    /// Query the current status
    async fn status(&self) -> Result<PlaybackStatus>;

    /// Install the status callback, replacing any previous one
    fn on_status_update(&mut self, callback: StatusCallback);

    /// Free the underlying resources
    ///
    /// Synchronous so it can run from `Drop`. Implementations that need
    /// async cleanup should spawn it.
    fn release(&mut self);
}

/// OS lock-screen / notification media controls
pub trait RemoteControlSurface: Send {
    /// Replace the displayed metadata
    ///
    /// # Errors
    /// Returns an error if the surface rejects the update
    fn set_now_playing(&mut self, now_playing: NowPlaying) -> Result<()>;

    /// Enable or disable a control button
    ///
    /// # Errors
    /// Returns an error if the surface rejects the update
    fn enable_control(
        &mut self,
        control: Control,
        enabled: bool,
        options: Option<ControlOptions>,
    ) -> Result<()>;

    /// Register a handler for a remote command
    ///
    /// # Errors
    /// Returns an error if the handler cannot be registered
    fn on_command(&mut self, command: RemoteCommand, handler: CommandHandler) -> Result<()>;
}
