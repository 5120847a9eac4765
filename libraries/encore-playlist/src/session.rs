//! Ownership of the active playback session

use crate::events::SessionId;
use encore_core::{EncoreError, PlaybackSession, PlaybackStatus, Result};
use tracing::debug;

/// Owns a session and releases it exactly once
///
/// Release happens either explicitly through [`SessionGuard::release`] or
/// when the guard is dropped, whichever comes first.
pub(crate) struct SessionGuard {
    id: SessionId,
    index: usize,
    session: Option<Box<dyn PlaybackSession>>,
}

impl SessionGuard {
    pub(crate) fn new(id: SessionId, index: usize, session: Box<dyn PlaybackSession>) -> Self {
        Self {
            id,
            index,
            session: Some(session),
        }
    }

    pub(crate) fn id(&self) -> SessionId {
        self.id
    }

    /// Playlist index the session was created for
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    fn session(&self) -> Result<&dyn PlaybackSession> {
        self.session.as_deref().ok_or(EncoreError::SessionReleased)
    }

    pub(crate) async fn play(&self) -> Result<()> {
        self.session()?.play().await
    }

    pub(crate) async fn pause(&self) -> Result<()> {
        self.session()?.pause().await
    }

    pub(crate) async fn stop(&self) -> Result<()> {
        self.session()?.stop().await
    }

    pub(crate) async fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.session()?.seek_to(position_ms).await
    }

    pub(crate) async fn status(&self) -> Result<PlaybackStatus> {
        self.session()?.status().await
    }

    /// Release now; later calls and the eventual drop are no-ops
    pub(crate) fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
            debug!("Released {} (track {})", self.id, self.index);
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}
