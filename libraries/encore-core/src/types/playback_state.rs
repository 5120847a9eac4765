/// Playback state types
use serde::{Deserialize, Serialize};

/// Lower bound for any published duration, keeps position ratios finite
pub const MIN_DURATION_MS: u64 = 1;

/// Where the controller is in its playback lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    /// Nothing has been loaded yet
    #[default]
    Idle,
    /// Waiting for the engine to create a session
    Loading,
    /// Session is producing audio
    Playing,
    /// Session is loaded but paused
    Paused,
    /// Session was stopped or ran past the last track
    Stopped,
}

impl PlaybackPhase {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status reported by a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackStatus {
    /// Whether the session has media loaded
    pub is_loaded: bool,

    /// Whether the session is currently producing audio
    pub is_playing: bool,

    /// Current position in milliseconds
    pub position_ms: u64,

    /// Track length in milliseconds, if the engine knows it
    pub duration_ms: Option<u64>,
}

impl PlaybackStatus {
    /// Duration to publish, never below [`MIN_DURATION_MS`]
    #[must_use]
    pub fn duration_or_default(&self) -> u64 {
        self.duration_ms
            .filter(|ms| *ms >= MIN_DURATION_MS)
            .unwrap_or(MIN_DURATION_MS)
    }
}

/// A status callback payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Session status at the time of the update
    pub status: PlaybackStatus,

    /// Set once, when the track reached its natural end
    pub did_just_finish: bool,
}

impl StatusUpdate {
    /// Regular progress update
    pub fn progress(status: PlaybackStatus) -> Self {
        Self {
            status,
            did_just_finish: false,
        }
    }

    /// Finished signal
    pub fn finished(status: PlaybackStatus) -> Self {
        Self {
            status,
            did_just_finish: true,
        }
    }
}

/// Snapshot of the playlist view-state
///
/// The controller never mutates a snapshot in place. Every transition below
/// builds a new value which replaces the previous one as a whole, so readers
/// never observe a mix of old and new fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistState {
    /// Index of the loaded track
    pub current_index: Option<usize>,

    /// Display name of the loaded track
    pub current_title: Option<String>,

    /// Whether audio is playing
    pub is_playing: bool,

    /// Position in milliseconds
    pub position_ms: u64,

    /// Duration in milliseconds, always >= 1
    pub duration_ms: u64,

    /// Whether any track was ever loaded
    pub has_played_before: bool,

    /// Lifecycle phase
    pub phase: PlaybackPhase,
}

impl Default for PlaylistState {
    fn default() -> Self {
        Self {
            current_index: None,
            current_title: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: MIN_DURATION_MS,
            has_played_before: false,
            phase: PlaybackPhase::Idle,
        }
    }
}

impl PlaylistState {
    /// Playback progress in `[0.0, 1.0]`
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.position_ms as f64 / self.duration_ms.max(MIN_DURATION_MS) as f64).clamp(0.0, 1.0)
    }

    /// A new session is being created
    ///
    /// The previous session is already released, so nothing is playing.
    #[must_use]
    pub fn loading(&self) -> Self {
        Self {
            is_playing: false,
            phase: PlaybackPhase::Loading,
            ..self.clone()
        }
    }

    /// Session creation failed, the previous session is already gone
    #[must_use]
    pub fn load_failed(&self) -> Self {
        let phase = if self.has_played_before {
            PlaybackPhase::Stopped
        } else {
            PlaybackPhase::Idle
        };
        Self {
            is_playing: false,
            phase,
            ..self.clone()
        }
    }

    /// A session for `index` is live and reported `status`
    #[must_use]
    pub fn track_loaded(&self, index: usize, title: &str, status: &PlaybackStatus) -> Self {
        Self {
            current_index: Some(index),
            current_title: Some(title.to_string()),
            is_playing: status.is_playing,
            position_ms: status.position_ms,
            duration_ms: status.duration_or_default(),
            has_played_before: true,
            phase: if status.is_playing {
                PlaybackPhase::Playing
            } else {
                PlaybackPhase::Loading
            },
        }
    }

    /// Mirror an engine status update
    ///
    /// Updates from an unloaded session carry no information and leave the
    /// state untouched. A stopped session stays stopped until it plays again.
    #[must_use]
    pub fn mirror_status(&self, status: &PlaybackStatus) -> Self {
        if !status.is_loaded {
            return self.clone();
        }
        let phase = match (status.is_playing, self.phase) {
            (true, _) => PlaybackPhase::Playing,
            (false, PlaybackPhase::Stopped) => PlaybackPhase::Stopped,
            (false, _) => PlaybackPhase::Paused,
        };
        Self {
            is_playing: status.is_playing,
            position_ms: status.position_ms,
            duration_ms: status.duration_or_default(),
            phase,
            ..self.clone()
        }
    }

    /// The last track finished, the session is retained
    #[must_use]
    pub fn finished(&self) -> Self {
        Self {
            is_playing: false,
            phase: PlaybackPhase::Stopped,
            ..self.clone()
        }
    }

    /// Explicit stop: rewind, keep the last known duration
    #[must_use]
    pub fn stopped(&self) -> Self {
        Self {
            is_playing: false,
            position_ms: 0,
            phase: PlaybackPhase::Stopped,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(is_playing: bool, position_ms: u64, duration_ms: Option<u64>) -> PlaybackStatus {
        PlaybackStatus {
            is_loaded: true,
            is_playing,
            position_ms,
            duration_ms,
        }
    }

    #[test]
    fn default_state_is_idle() {
        let state = PlaylistState::default();
        assert_eq!(state.phase, PlaybackPhase::Idle);
        assert_eq!(state.duration_ms, 1);
        assert!(!state.has_played_before);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn missing_or_zero_duration_falls_back_to_one() {
        assert_eq!(loaded(true, 0, None).duration_or_default(), 1);
        assert_eq!(loaded(true, 0, Some(0)).duration_or_default(), 1);
        assert_eq!(loaded(true, 0, Some(42)).duration_or_default(), 42);
    }

    #[test]
    fn track_loaded_sets_identity_and_flags() {
        let state = PlaylistState::default()
            .loading()
            .track_loaded(2, "c.mp3", &loaded(true, 0, Some(90_000)));

        assert_eq!(state.current_index, Some(2));
        assert_eq!(state.current_title.as_deref(), Some("c.mp3"));
        assert!(state.is_playing);
        assert!(state.has_played_before);
        assert_eq!(state.duration_ms, 90_000);
        assert_eq!(state.phase, PlaybackPhase::Playing);
    }

    #[test]
    fn unloaded_status_is_ignored() {
        let state = PlaylistState::default().track_loaded(0, "a", &loaded(true, 10, Some(100)));
        let unloaded = PlaybackStatus {
            is_loaded: false,
            ..PlaybackStatus::default()
        };
        assert_eq!(state.mirror_status(&unloaded), state);
    }

    #[test]
    fn pause_and_resume_follow_the_engine() {
        let playing = PlaylistState::default().track_loaded(0, "a", &loaded(true, 0, Some(100)));
        let paused = playing.mirror_status(&loaded(false, 40, Some(100)));
        assert_eq!(paused.phase, PlaybackPhase::Paused);
        assert_eq!(paused.position_ms, 40);

        let resumed = paused.mirror_status(&loaded(true, 41, Some(100)));
        assert_eq!(resumed.phase, PlaybackPhase::Playing);
        assert!(resumed.is_playing);
    }

    #[test]
    fn stop_rewinds_but_keeps_duration() {
        let state = PlaylistState::default()
            .track_loaded(1, "b", &loaded(true, 0, Some(5_000)))
            .mirror_status(&loaded(true, 2_500, Some(5_000)))
            .stopped();

        assert_eq!(state.position_ms, 0);
        assert_eq!(state.duration_ms, 5_000);
        assert!(!state.is_playing);
        assert_eq!(state.phase, PlaybackPhase::Stopped);

        // A later non-playing report does not turn a stop into a pause
        let after = state.mirror_status(&loaded(false, 0, Some(5_000)));
        assert_eq!(after.phase, PlaybackPhase::Stopped);
    }

    #[test]
    fn loading_clears_playing_flag() {
        let state = PlaylistState::default()
            .track_loaded(0, "a", &loaded(true, 30, Some(100)))
            .loading();

        assert!(!state.is_playing);
        assert_eq!(state.phase, PlaybackPhase::Loading);
        assert_eq!(state.current_index, Some(0));
        assert!(state.has_played_before);
    }

    #[test]
    fn load_failure_falls_back_by_history() {
        let fresh = PlaylistState::default().loading().load_failed();
        assert_eq!(fresh.phase, PlaybackPhase::Idle);

        let played = PlaylistState::default()
            .track_loaded(0, "a", &loaded(true, 0, Some(100)))
            .loading()
            .load_failed();
        assert_eq!(played.phase, PlaybackPhase::Stopped);
        assert_eq!(played.current_index, Some(0));
        assert!(!played.is_playing);
    }

    #[test]
    fn progress_is_clamped() {
        let state = PlaylistState::default().track_loaded(0, "a", &loaded(true, 150, Some(100)));
        assert_eq!(state.progress(), 1.0);
    }
}
