/// Notification surface types
use serde::{Deserialize, Serialize};

/// Metadata pushed to the OS media notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Track title
    pub title: String,

    /// Artist line
    pub artist: String,

    /// Artwork reference understood by the surface (asset name or URI)
    pub artwork: Option<String>,

    /// Track length in milliseconds
    pub duration_ms: u64,

    /// Accent color as `#RRGGBB`
    pub color: String,
}

/// A button on the notification surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Resume button
    Play,
    /// Pause button
    Pause,
    /// Skip forward button
    NextTrack,
    /// Skip back button
    PreviousTrack,
    /// Dismiss the notification
    CloseNotification,
}

impl Control {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::NextTrack => "nextTrack",
            Self::PreviousTrack => "previousTrack",
            Self::CloseNotification => "closeNotification",
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// When a control applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlCondition {
    /// Only while playback is paused
    Paused,
}

/// Extra options for [`Control`] enablement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlOptions {
    /// Restrict the control to a playback condition
    pub when: Option<ControlCondition>,
}

impl ControlOptions {
    /// Options restricting a control to `condition`
    pub fn when(condition: ControlCondition) -> Self {
        Self {
            when: Some(condition),
        }
    }
}

/// A command sent by the surface (lock screen, headset, notification)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteCommand {
    /// Resume playback
    Play,
    /// Pause playback
    Pause,
    /// Skip to the following track
    NextTrack,
    /// Skip to the preceding track
    PreviousTrack,
}

impl RemoteCommand {
    /// Every command the controller binds
    pub const ALL: [RemoteCommand; 4] = [
        RemoteCommand::Play,
        RemoteCommand::Pause,
        RemoteCommand::NextTrack,
        RemoteCommand::PreviousTrack,
    ];
}
