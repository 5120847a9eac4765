//! Playlist controller - core orchestration
//!
//! Sequences calls into a [`PlaybackEngine`] and a [`RemoteControlSurface`]
//! and keeps a [`PlaylistState`] snapshot in sync with both.
//!
//! # State machine
//!
//! ```text
//!   Idle ──toggle / load_and_play──▶ Loading ──▶ Playing ◀──toggle──▶ Paused
//!                                      ▲            │
//!                     finished, next   │            ├─finished, last─▶ Stopped
//!                     next / previous  │            └─stop──────────▶ Stopped
//!                                      └─────────────────────────────────┘
//! ```

use crate::config::{ControllerConfig, RemoteBinding};
use crate::events::{ControllerEvent, PlaylistCommand, SessionId};
use crate::remote;
use crate::session::SessionGuard;
use encore_core::{
    PlaybackEngine, PlaylistState, RemoteCommand, RemoteControlSurface, Result, StatusUpdate,
    Track,
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Drives one playlist through a playback engine and a remote surface
///
/// All mutation happens through `&mut self`, either from direct calls or from
/// [`run`](Self::run). Engine callbacks and remote commands are queued as
/// [`ControllerEvent`]s and applied by [`handle_event`](Self::handle_event).
pub struct PlaylistController<E, R> {
    tracks: Arc<[Track]>,
    engine: E,
    remote: R,
    config: ControllerConfig,

    /// At most one live session
    session: Option<SessionGuard>,
    session_seq: u64,
    /// Commands with a handler registered on the surface
    bound_commands: HashSet<RemoteCommand>,

    state_tx: watch::Sender<PlaylistState>,
    events_tx: mpsc::UnboundedSender<ControllerEvent>,
    events_rx: mpsc::UnboundedReceiver<ControllerEvent>,
}

impl<E, R> PlaylistController<E, R>
where
    E: PlaybackEngine,
    R: RemoteControlSurface,
{
    /// Create a controller with default configuration
    pub fn new(tracks: impl Into<Arc<[Track]>>, engine: E, remote: R) -> Self {
        Self::with_config(tracks, engine, remote, ControllerConfig::default())
    }

    /// Create a controller with the given configuration
    pub fn with_config(
        tracks: impl Into<Arc<[Track]>>,
        engine: E,
        remote: R,
        config: ControllerConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(PlaylistState::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            tracks: tracks.into(),
            engine,
            remote,
            config,
            session: None,
            session_seq: 0,
            bound_commands: HashSet::new(),
            state_tx,
            events_tx,
            events_rx,
        }
    }

    // ===== Accessors =====

    /// Current state snapshot
    pub fn state(&self) -> PlaylistState {
        self.state_tx.borrow().clone()
    }

    /// Receiver that observes every state replacement
    pub fn subscribe(&self) -> watch::Receiver<PlaylistState> {
        self.state_tx.subscribe()
    }

    /// The playlist, in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Whether a playback session is live
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Sender feeding this controller's event queue
    ///
    /// Platform glue that cannot use the collaborator callbacks can inject
    /// events here directly.
    pub fn event_sender(&self) -> mpsc::UnboundedSender<ControllerEvent> {
        self.events_tx.clone()
    }

    // ===== Operations =====

    /// Release the active session and start the track at `index`
    ///
    /// Out-of-range indices are ignored. If the engine fails to create the
    /// session the error is returned; the previous session is already
    /// released by then.
    pub async fn load_and_play(&mut self, index: usize) -> Result<()> {
        let Some(track) = self.tracks.get(index).cloned() else {
            debug!(
                "Ignoring play request for index {} (playlist has {} tracks)",
                index,
                self.tracks.len()
            );
            return Ok(());
        };

        if let Some(mut previous) = self.session.take() {
            previous.release();
        }

        self.replace_state(PlaylistState::loading);

        match self.start_session(index, &track).await {
            Ok(()) => {
                info!("Playing track {} '{}'", index, track.display_name);
                Ok(())
            }
            Err(err) => {
                self.replace_state(PlaylistState::load_failed);
                Err(err)
            }
        }
    }

    async fn start_session(&mut self, index: usize, track: &Track) -> Result<()> {
        let mut session = self.engine.create_session(&track.uri, true).await?;

        self.session_seq += 1;
        let id = SessionId(self.session_seq);

        let events = self.events_tx.clone();
        session.on_status_update(Box::new(move |update: StatusUpdate| {
            let _ = events.send(ControllerEvent::Status {
                session: id,
                update,
            });
        }));

        // Dropping the guard on any error below releases the new session
        let guard = SessionGuard::new(id, index, session);
        let status = guard.status().await?;

        remote::publish_track(
            &mut self.remote,
            &self.config,
            &self.tracks,
            index,
            status.duration_or_default(),
        )?;
        self.bind_remote_commands()?;

        self.session = Some(guard);
        self.replace_state(|state| state.track_loaded(index, &track.display_name, &status));
        Ok(())
    }

    fn bind_remote_commands(&mut self) -> Result<()> {
        if self.config.remote.binding == RemoteBinding::EveryLoad {
            self.bound_commands.clear();
        }
        remote::bind_commands(&mut self.remote, &self.events_tx, &mut self.bound_commands)
    }

    /// Flip between playing and paused
    ///
    /// Without a session this starts the first track, but only if nothing
    /// was ever played and the playlist is not empty.
    pub async fn toggle_play_pause(&mut self) -> Result<()> {
        let Some(session) = &self.session else {
            return self.start_first_track().await;
        };

        let status = session.status().await?;
        if !status.is_loaded {
            debug!("Toggle ignored: {} not loaded", session.id());
            return Ok(());
        }
        if status.is_playing {
            session.pause().await
        } else {
            session.play().await
        }
    }

    async fn start_first_track(&mut self) -> Result<()> {
        let has_played_before = self.state_tx.borrow().has_played_before;
        if !has_played_before && !self.tracks.is_empty() {
            return self.load_and_play(0).await;
        }
        debug!("Toggle ignored: no session");
        Ok(())
    }

    /// Stop playback and rewind, keeping the last known duration
    pub async fn stop(&mut self) -> Result<()> {
        let Some(session) = &self.session else {
            debug!("Stop ignored: no session");
            return Ok(());
        };
        session.stop().await?;
        self.replace_state(PlaylistState::stopped);
        Ok(())
    }

    /// Advance to the next track, wrapping to the first
    pub async fn next(&mut self) -> Result<()> {
        let Some(index) = self.state_tx.borrow().current_index else {
            debug!("Next ignored: nothing loaded");
            return Ok(());
        };
        let next = (index + 1) % self.tracks.len();
        self.load_and_play(next).await
    }

    /// Go back to the previous track, wrapping to the last
    pub async fn previous(&mut self) -> Result<()> {
        let Some(index) = self.state_tx.borrow().current_index else {
            debug!("Previous ignored: nothing loaded");
            return Ok(());
        };
        let len = self.tracks.len();
        let previous = (index + len - 1) % len;
        self.load_and_play(previous).await
    }

    /// Move the playhead of the active session
    ///
    /// The state is updated by the engine's next status report, not here.
    pub async fn seek(&mut self, position_ms: u64) -> Result<()> {
        match &self.session {
            Some(session) => session.seek_to(position_ms).await,
            None => {
                debug!("Seek ignored: no session");
                Ok(())
            }
        }
    }

    /// Release the active session
    ///
    /// The controller stays usable; dropping it has the same effect.
    pub fn shutdown(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
        }
    }

    // ===== Event processing =====

    /// Apply one queued event
    pub async fn handle_event(&mut self, event: ControllerEvent) -> Result<()> {
        match event {
            ControllerEvent::Status { session, update } => self.on_status(session, update).await,
            ControllerEvent::Remote(command) => self.on_remote_command(command).await,
        }
    }

    /// Apply every event already queued, without waiting for new ones
    ///
    /// Returns the number of events applied.
    pub async fn process_pending(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event).await?;
            applied += 1;
        }
        Ok(applied)
    }

    async fn on_status(&mut self, id: SessionId, update: StatusUpdate) -> Result<()> {
        let index = match &self.session {
            Some(session) if session.id() == id => session.index(),
            _ => {
                debug!("Dropping status from stale {}", id);
                return Ok(());
            }
        };

        if !update.status.is_loaded {
            return Ok(());
        }

        self.replace_state(|state| state.mirror_status(&update.status));

        if !update.did_just_finish {
            return Ok(());
        }

        if index + 1 < self.tracks.len() {
            debug!("Track {} finished, advancing", index);
            return self.load_and_play(index + 1).await;
        }

        debug!("Last track finished");
        if let Some(session) = &self.session {
            session.stop().await?;
        }
        self.replace_state(PlaylistState::finished);
        Ok(())
    }

    async fn on_remote_command(&mut self, command: RemoteCommand) -> Result<()> {
        debug!("Remote command {:?}", command);
        match command {
            RemoteCommand::Play => match &self.session {
                Some(session) => session.play().await,
                None => Ok(()),
            },
            RemoteCommand::Pause => match &self.session {
                Some(session) => session.pause().await,
                None => Ok(()),
            },
            RemoteCommand::NextTrack => match self.current_index() {
                Some(index) if index + 1 < self.tracks.len() => self.load_and_play(index + 1).await,
                _ => Ok(()),
            },
            RemoteCommand::PreviousTrack => match self.current_index() {
                Some(index) if index > 0 => self.load_and_play(index - 1).await,
                _ => Ok(()),
            },
        }
    }

    // ===== Command loop =====

    /// Execute commands and queued events until the command channel closes
    ///
    /// Event failures are logged and do not stop the loop; command failures
    /// are returned to the command's sender.
    pub async fn run(mut self, mut commands: mpsc::Receiver<PlaylistCommand>) {
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if !self.execute(command).await {
                        break;
                    }
                }
                Some(event) = self.events_rx.recv() => {
                    if let Err(err) = self.handle_event(event).await {
                        warn!("Failed to apply playback event: {}", err);
                    }
                }
            }
        }

        self.shutdown();
        debug!("Playlist controller stopped");
    }

    /// Returns false when the loop should end
    async fn execute(&mut self, command: PlaylistCommand) -> bool {
        let (result, reply) = match command {
            PlaylistCommand::Play { index, reply } => (self.load_and_play(index).await, reply),
            PlaylistCommand::TogglePlayPause { reply } => (self.toggle_play_pause().await, reply),
            PlaylistCommand::Stop { reply } => (self.stop().await, reply),
            PlaylistCommand::Next { reply } => (self.next().await, reply),
            PlaylistCommand::Previous { reply } => (self.previous().await, reply),
            PlaylistCommand::Seek { position_ms, reply } => (self.seek(position_ms).await, reply),
            PlaylistCommand::Shutdown { reply } => {
                self.shutdown();
                let _ = reply.send(Ok(()));
                return false;
            }
        };
        // Caller may have stopped waiting
        let _ = reply.send(result);
        true
    }

    // ===== Helpers =====

    fn current_index(&self) -> Option<usize> {
        self.state_tx.borrow().current_index
    }

    /// Replace the snapshot with `f(current)`
    fn replace_state(&self, f: impl FnOnce(&PlaylistState) -> PlaylistState) {
        let next = {
            let current = self.state_tx.borrow();
            f(&current)
        };
        self.state_tx.send_replace(next);
    }
}
