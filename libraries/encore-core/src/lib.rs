//! Encore Core
//!
//! Platform-agnostic types, collaborator traits, and error handling for the
//! Encore playlist controller.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaylistState`, `PlaybackStatus`, `NowPlaying`
//! - **Collaborator Traits**: `PlaybackEngine`, `PlaybackSession`, `RemoteControlSurface`
//! - **Error Handling**: Unified `EncoreError` and `Result` types
//!
//! Nothing in here talks to a real audio stack or to the OS notification
//! area. Platform bindings implement the traits; `encore-playlist` drives them.
//!
//! # Example
//!
//! ```rust
//! use encore_core::types::{PlaylistState, Track};
//!
//! let tracks = vec![
//!     Track::new("file:///music/intro.mp3", "intro.mp3"),
//!     Track::new("file:///music/outro.mp3", "outro.mp3"),
//! ];
//!
//! let state = PlaylistState::default();
//! assert!(state.current_index.is_none());
//! assert_eq!(state.duration_ms, 1);
//! assert_eq!(tracks[1].display_name, "outro.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EncoreError, Result};
pub use traits::{CommandHandler, PlaybackEngine, PlaybackSession, RemoteControlSurface, StatusCallback};
pub use types::{
    Control, ControlCondition, ControlOptions, NowPlaying, PlaybackPhase, PlaybackStatus,
    PlaylistState, RemoteCommand, StatusUpdate, Track,
};
