//! Notification surface publishing and command binding.
//!
//! The controller pushes metadata and button state to the surface after every
//! load, and the surface pushes commands back through handlers that only
//! enqueue a [`ControllerEvent`].

use crate::config::ControllerConfig;
use crate::events::ControllerEvent;
use encore_core::{
    Control, ControlCondition, ControlOptions, NowPlaying, RemoteCommand, RemoteControlSurface,
    Result, Track,
};
use std::collections::HashSet;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

/// Surface for platforms without media notification support
///
/// Accepts every call and logs it at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRemoteSurface;

impl RemoteControlSurface for NoopRemoteSurface {
    fn set_now_playing(&mut self, now_playing: NowPlaying) -> Result<()> {
        trace!("NoopRemoteSurface: now playing {:?}", now_playing.title);
        Ok(())
    }

    fn enable_control(
        &mut self,
        control: Control,
        enabled: bool,
        _options: Option<ControlOptions>,
    ) -> Result<()> {
        trace!("NoopRemoteSurface: {} enabled={}", control, enabled);
        Ok(())
    }

    fn on_command(&mut self, command: RemoteCommand, _handler: encore_core::CommandHandler) -> Result<()> {
        trace!("NoopRemoteSurface: ignoring handler for {:?}", command);
        Ok(())
    }
}

/// Build the notification metadata for `track`
pub(crate) fn now_playing(config: &ControllerConfig, track: &Track, duration_ms: u64) -> NowPlaying {
    NowPlaying {
        title: track.display_name.clone(),
        artist: config.notification.artist.clone(),
        artwork: config.notification.artwork.clone(),
        duration_ms,
        color: config.notification.color.clone(),
    }
}

/// Button states for the track at `index` in a playlist of `len` tracks
pub(crate) fn control_states(
    config: &ControllerConfig,
    index: usize,
    len: usize,
) -> [(Control, bool, Option<ControlOptions>); 5] {
    let close_options = config
        .remote
        .close_when_paused
        .then(|| ControlOptions::when(ControlCondition::Paused));

    [
        (Control::Play, true, None),
        (Control::Pause, true, None),
        (Control::NextTrack, index + 1 < len, None),
        (Control::PreviousTrack, index > 0, None),
        (Control::CloseNotification, true, close_options),
    ]
}

/// Push metadata and button states for a freshly loaded track
pub(crate) fn publish_track<R: RemoteControlSurface>(
    surface: &mut R,
    config: &ControllerConfig,
    tracks: &[Track],
    index: usize,
    duration_ms: u64,
) -> Result<()> {
    let track = &tracks[index];
    surface.set_now_playing(now_playing(config, track, duration_ms))?;

    for (control, enabled, options) in control_states(config, index, tracks.len()) {
        surface.enable_control(control, enabled, options)?;
    }

    debug!(
        "Published '{}' ({} ms) to remote surface",
        track.display_name, duration_ms
    );
    Ok(())
}

/// Register handlers that forward every [`RemoteCommand`] into `events`
///
/// Commands already in `bound` are skipped. Each registration is recorded as
/// soon as the surface accepts it.
pub(crate) fn bind_commands<R: RemoteControlSurface>(
    surface: &mut R,
    events: &UnboundedSender<ControllerEvent>,
    bound: &mut HashSet<RemoteCommand>,
) -> Result<()> {
    let mut added = 0;
    for command in RemoteCommand::ALL {
        if bound.contains(&command) {
            continue;
        }
        let events = events.clone();
        surface.on_command(
            command,
            Box::new(move || {
                // Closed queue means the controller is gone
                let _ = events.send(ControllerEvent::Remote(command));
            }),
        )?;
        bound.insert(command);
        added += 1;
    }
    if added > 0 {
        debug!("Bound {} remote commands", added);
    }
    Ok(())
}
