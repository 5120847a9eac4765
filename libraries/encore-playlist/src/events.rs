//! Controller events and commands
//!
//! Everything that can mutate the controller goes through one of two
//! queues:
//! - [`ControllerEvent`]s, produced by engine status callbacks and remote
//!   command handlers
//! - [`PlaylistCommand`]s, produced by a [`PlaylistHandle`](crate::PlaylistHandle)
//!
//! Both are consumed on the controller's task, one at a time.

use encore_core::{RemoteCommand, Result, StatusUpdate};
use tokio::sync::oneshot;

/// Identifies one playback session over the controller's lifetime
///
/// Status events carry the id of the session that produced them so updates
/// from an already released session can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Asynchronous input from the collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A session reported a status change
    Status {
        /// Reporting session
        session: SessionId,
        /// Reported status
        update: StatusUpdate,
    },

    /// The remote surface delivered a command
    Remote(RemoteCommand),
}

/// Reply channel for a [`PlaylistCommand`]
pub type Reply = oneshot::Sender<Result<()>>;

/// Imperative operations requested through a handle
#[derive(Debug)]
pub enum PlaylistCommand {
    /// Load and play the track at `index`
    Play { index: usize, reply: Reply },
    /// Flip between playing and paused
    TogglePlayPause { reply: Reply },
    /// Stop and rewind
    Stop { reply: Reply },
    /// Advance circularly
    Next { reply: Reply },
    /// Retreat circularly
    Previous { reply: Reply },
    /// Move the playhead
    Seek { position_ms: u64, reply: Reply },
    /// Release the session and end the command loop
    Shutdown { reply: Reply },
}
