//! Cloneable front end for a controller running on its own task

use crate::controller::PlaylistController;
use crate::events::{PlaylistCommand, Reply};
use encore_core::{EncoreError, PlaybackEngine, PlaylistState, RemoteControlSurface, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Pending commands before senders wait for the controller
const COMMAND_BUFFER: usize = 32;

/// Handle to a spawned [`PlaylistController`]
///
/// Every method resolves once the controller has executed the command, and
/// returns the command's own error if it failed.
#[derive(Clone)]
pub struct PlaylistHandle {
    commands: mpsc::Sender<PlaylistCommand>,
    state: watch::Receiver<PlaylistState>,
}

impl PlaylistHandle {
    /// Load and play the track at `index`
    pub async fn play(&self, index: usize) -> Result<()> {
        self.request(|reply| PlaylistCommand::Play { index, reply }).await
    }

    /// Flip between playing and paused
    pub async fn toggle_play_pause(&self) -> Result<()> {
        self.request(|reply| PlaylistCommand::TogglePlayPause { reply })
            .await
    }

    /// Stop and rewind
    pub async fn stop(&self) -> Result<()> {
        self.request(|reply| PlaylistCommand::Stop { reply }).await
    }

    /// Advance circularly
    pub async fn next(&self) -> Result<()> {
        self.request(|reply| PlaylistCommand::Next { reply }).await
    }

    /// Retreat circularly
    pub async fn previous(&self) -> Result<()> {
        self.request(|reply| PlaylistCommand::Previous { reply }).await
    }

    /// Move the playhead
    pub async fn seek(&self, position_ms: u64) -> Result<()> {
        self.request(|reply| PlaylistCommand::Seek { position_ms, reply })
            .await
    }

    /// Release the session and end the controller task
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| PlaylistCommand::Shutdown { reply })
            .await
    }

    /// Latest state snapshot
    pub fn snapshot(&self) -> PlaylistState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state replacement
    pub fn subscribe(&self) -> watch::Receiver<PlaylistState> {
        self.state.clone()
    }

    async fn request(&self, build: impl FnOnce(Reply) -> PlaylistCommand) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| EncoreError::ControllerClosed)?;
        response.await.map_err(|_| EncoreError::ControllerClosed)?
    }
}

/// Spawn `controller` onto the current tokio runtime
///
/// The task ends when every handle is dropped or after
/// [`PlaylistHandle::shutdown`]; either way the active session is released.
///
/// # Panics
/// Panics if called outside a tokio runtime.
pub fn spawn_controller<E, R>(controller: PlaylistController<E, R>) -> (PlaylistHandle, JoinHandle<()>)
where
    E: PlaybackEngine + 'static,
    R: RemoteControlSurface + 'static,
{
    let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
    let state = controller.subscribe();
    let task = tokio::spawn(controller.run(receiver));
    (PlaylistHandle { commands, state }, task)
}
