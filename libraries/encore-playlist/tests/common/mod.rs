//! Test doubles shared by the integration tests
//!
//! `FakeEngine` records every session it creates and lets tests fire status
//! updates as the platform would. `RecordingSurface` keeps every call made to
//! the notification surface and can replay remote commands.

#![allow(dead_code)]

use async_trait::async_trait;
use encore_core::{
    CommandHandler, Control, ControlOptions, EncoreError, NowPlaying, PlaybackEngine,
    PlaybackSession, PlaybackStatus, RemoteCommand, RemoteControlSurface, Result, StatusCallback,
    StatusUpdate, Track,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn tracks(names: &[&str]) -> Vec<Track> {
    names
        .iter()
        .map(|name| Track::new(format!("file:///music/{name}"), *name))
        .collect()
}

// ===== Engine =====

pub struct SessionRecord {
    pub uri: String,
    pub status: PlaybackStatus,
    pub ops: Vec<String>,
    pub released: usize,
    callback: Option<Arc<StatusCallback>>,
}

#[derive(Default)]
pub struct EngineLog {
    pub sessions: Vec<SessionRecord>,
}

#[derive(Clone)]
pub struct FakeEngine {
    log: Arc<Mutex<EngineLog>>,
    duration_ms: Option<u64>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::with_duration(Some(180_000))
    }

    pub fn with_duration(duration_ms: Option<u64>) -> Self {
        Self {
            log: Arc::new(Mutex::new(EngineLog::default())),
            duration_ms,
            failing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Make `create_session` fail for `uri`
    pub fn fail_on(&self, uri: &str) {
        self.failing.lock().unwrap().insert(uri.to_string());
    }

    pub fn created(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .sessions
            .iter()
            .map(|s| s.uri.clone())
            .collect()
    }

    pub fn session_count(&self) -> usize {
        self.log.lock().unwrap().sessions.len()
    }

    pub fn latest(&self) -> usize {
        self.session_count() - 1
    }

    pub fn released(&self, session: usize) -> usize {
        self.log.lock().unwrap().sessions[session].released
    }

    /// Sessions created but not yet released
    pub fn live_sessions(&self) -> usize {
        self.log
            .lock()
            .unwrap()
            .sessions
            .iter()
            .filter(|s| s.released == 0)
            .count()
    }

    pub fn ops(&self, session: usize) -> Vec<String> {
        self.log.lock().unwrap().sessions[session].ops.clone()
    }

    pub fn status(&self, session: usize) -> PlaybackStatus {
        self.log.lock().unwrap().sessions[session].status
    }

    /// Fire a status update from `session`
    pub fn emit(&self, session: usize, update: StatusUpdate) {
        let callback = self.log.lock().unwrap().sessions[session].callback.clone();
        if let Some(callback) = callback {
            (**callback)(update);
        }
    }

    /// Report playback progress from `session`
    pub fn progress(&self, session: usize, position_ms: u64) {
        let status = {
            let mut log = self.log.lock().unwrap();
            let record = &mut log.sessions[session];
            record.status.position_ms = position_ms;
            record.status
        };
        self.emit(session, StatusUpdate::progress(status));
    }

    /// Report natural end of track from `session`
    pub fn finish(&self, session: usize) {
        let status = {
            let mut log = self.log.lock().unwrap();
            let record = &mut log.sessions[session];
            record.status.is_playing = false;
            record.status.position_ms = record.status.duration_ms.unwrap_or(0);
            record.status
        };
        self.emit(session, StatusUpdate::finished(status));
    }
}

#[async_trait]
impl PlaybackEngine for FakeEngine {
    async fn create_session(&self, uri: &str, autoplay: bool) -> Result<Box<dyn PlaybackSession>> {
        if self.failing.lock().unwrap().contains(uri) {
            return Err(EncoreError::engine(format!("cannot open {uri}")));
        }

        let mut log = self.log.lock().unwrap();
        let number = log.sessions.len();
        log.sessions.push(SessionRecord {
            uri: uri.to_string(),
            status: PlaybackStatus {
                is_loaded: true,
                is_playing: autoplay,
                position_ms: 0,
                duration_ms: self.duration_ms,
            },
            ops: Vec::new(),
            released: 0,
            callback: None,
        });

        Ok(Box::new(FakeSession {
            number,
            log: Arc::clone(&self.log),
        }))
    }
}

struct FakeSession {
    number: usize,
    log: Arc<Mutex<EngineLog>>,
}

impl FakeSession {
    fn apply(&self, op: String, change: impl FnOnce(&mut PlaybackStatus)) {
        let mut log = self.log.lock().unwrap();
        let record = &mut log.sessions[self.number];
        record.ops.push(op);
        change(&mut record.status);
    }
}

#[async_trait]
impl PlaybackSession for FakeSession {
    async fn play(&self) -> Result<()> {
        self.apply("play".into(), |s| s.is_playing = true);
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.apply("pause".into(), |s| s.is_playing = false);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.apply("stop".into(), |s| {
            s.is_playing = false;
            s.position_ms = 0;
        });
        Ok(())
    }

    async fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.apply(format!("seek:{position_ms}"), |s| s.position_ms = position_ms);
        Ok(())
    }

    async fn status(&self) -> Result<PlaybackStatus> {
        Ok(self.log.lock().unwrap().sessions[self.number].status)
    }

    fn on_status_update(&mut self, callback: StatusCallback) {
        self.log.lock().unwrap().sessions[self.number].callback = Some(Arc::new(callback));
    }

    fn release(&mut self) {
        let mut log = self.log.lock().unwrap();
        let record = &mut log.sessions[self.number];
        record.released += 1;
        record.status.is_loaded = false;
        record.status.is_playing = false;
    }
}

// ===== Remote surface =====

#[derive(Default)]
pub struct SurfaceLog {
    pub now_playing: Vec<NowPlaying>,
    pub controls: Vec<(Control, bool, Option<ControlOptions>)>,
    handlers: Vec<(RemoteCommand, CommandHandler)>,
}

#[derive(Clone, Default)]
pub struct RecordingSurface {
    log: Arc<Mutex<SurfaceLog>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_now_playing(&self) -> Option<NowPlaying> {
        self.log.lock().unwrap().now_playing.last().cloned()
    }

    pub fn now_playing_count(&self) -> usize {
        self.log.lock().unwrap().now_playing.len()
    }

    /// Most recent enablement of `control`
    pub fn control(&self, control: Control) -> Option<(bool, Option<ControlOptions>)> {
        self.log
            .lock()
            .unwrap()
            .controls
            .iter()
            .rev()
            .find(|(c, _, _)| *c == control)
            .map(|(_, enabled, options)| (*enabled, *options))
    }

    pub fn handler_count(&self, command: RemoteCommand) -> usize {
        self.log
            .lock()
            .unwrap()
            .handlers
            .iter()
            .filter(|(c, _)| *c == command)
            .count()
    }

    /// Invoke every handler registered for `command`
    pub fn press(&self, command: RemoteCommand) {
        let log = self.log.lock().unwrap();
        for (_, handler) in log.handlers.iter().filter(|(c, _)| *c == command) {
            handler();
        }
    }
}

impl RemoteControlSurface for RecordingSurface {
    fn set_now_playing(&mut self, now_playing: NowPlaying) -> Result<()> {
        self.log.lock().unwrap().now_playing.push(now_playing);
        Ok(())
    }

    fn enable_control(
        &mut self,
        control: Control,
        enabled: bool,
        options: Option<ControlOptions>,
    ) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .controls
            .push((control, enabled, options));
        Ok(())
    }

    fn on_command(&mut self, command: RemoteCommand, handler: CommandHandler) -> Result<()> {
        self.log.lock().unwrap().handlers.push((command, handler));
        Ok(())
    }
}
