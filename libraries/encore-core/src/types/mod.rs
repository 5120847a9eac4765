mod playback_state;
mod remote;
mod track;

pub use playback_state::{PlaybackPhase, PlaybackStatus, PlaylistState, StatusUpdate, MIN_DURATION_MS};
pub use remote::{Control, ControlCondition, ControlOptions, NowPlaying, RemoteCommand};
pub use track::Track;
