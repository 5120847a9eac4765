//! Encore - Playlist Controller
//!
//! Wires a single-track-at-a-time playlist player to an OS media
//! notification surface.
//!
//! This crate provides:
//! - Load-and-play by index, with the previous session released first
//! - Play/pause toggle that starts the first track on a fresh controller
//! - Circular next/previous, stop-and-rewind, seek
//! - Automatic advance when a track finishes, stop after the last one
//! - Notification metadata and button state on every track change
//! - Remote command handling (play, pause, next, previous)
//! - A spawned command loop with a cloneable [`PlaylistHandle`]
//!
//! # Architecture
//!
//! `encore-playlist` does not decode audio or talk to the OS itself. Both
//! collaborators come in as traits from `encore-core`:
//! - [`PlaybackEngine`](encore_core::PlaybackEngine) creates sessions
//! - [`RemoteControlSurface`](encore_core::RemoteControlSurface) shows
//!   metadata and delivers commands
//!
//! State is a single [`PlaylistState`](encore_core::PlaylistState) value,
//! replaced as a whole on every transition and published through a
//! `tokio::sync::watch` channel.
//!
//! # Example
//!
//! ```rust,no_run
//! use encore_core::Track;
//! use encore_playlist::{spawn_controller, NoopRemoteSurface, PlaylistController};
//! # async fn demo(engine: impl encore_core::PlaybackEngine + 'static) -> encore_core::Result<()> {
//! let tracks = vec![
//!     Track::new("file:///music/a.mp3", "a.mp3"),
//!     Track::new("file:///music/b.mp3", "b.mp3"),
//! ];
//!
//! let controller = PlaylistController::new(tracks, engine, NoopRemoteSurface);
//! let (player, _task) = spawn_controller(controller);
//!
//! player.toggle_play_pause().await?; // starts a.mp3
//! player.next().await?;              // b.mp3
//! assert_eq!(player.snapshot().current_index, Some(1));
//! # Ok(())
//! # }
//! ```

mod controller;
mod events;
mod handle;
mod remote;
mod session;

pub mod config;

// Public exports
pub use config::{ControllerConfig, NotificationSettings, RemoteBinding, RemoteSettings};
pub use controller::PlaylistController;
pub use events::{ControllerEvent, PlaylistCommand, Reply, SessionId};
pub use handle::{spawn_controller, PlaylistHandle};
pub use remote::NoopRemoteSurface;
