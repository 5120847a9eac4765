//! Controller configuration
//!
//! Settings come from an optional TOML file overlaid with `ENCORE_`-prefixed
//! environment variables (`ENCORE_NOTIFICATION__ARTIST=...`).

use encore_core::{EncoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder shown when tracks carry no artist tag
const DEFAULT_ARTIST: &str = "Unknown Artist";

/// Asset shown when tracks carry no artwork
const DEFAULT_ARTWORK: &str = "unknown_track.png";

const DEFAULT_COLOR: &str = "#79299E";

/// Configuration for [`PlaylistController`](crate::PlaylistController)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// What the notification shows
    pub notification: NotificationSettings,

    /// How the remote surface is wired
    pub remote: RemoteSettings,
}

/// Notification metadata defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// Artist line
    pub artist: String,

    /// Artwork asset or URI
    pub artwork: Option<String>,

    /// Accent color, `#RRGGBB`
    pub color: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            artist: DEFAULT_ARTIST.to_string(),
            artwork: Some(DEFAULT_ARTWORK.to_string()),
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Remote surface wiring
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// When command handlers are registered
    pub binding: RemoteBinding,

    /// Offer the close button only while paused
    pub close_when_paused: bool,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            binding: RemoteBinding::Once,
            close_when_paused: true,
        }
    }
}

/// Registration policy for remote command handlers
///
/// Handlers always route into the controller, so a single registration keeps
/// working across track changes. `EveryLoad` registers the full set again on
/// each load; surfaces that append rather than replace handlers will then
/// deliver each command once per registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteBinding {
    /// Register on the first successful load only
    #[default]
    Once,
    /// Register on every load
    EveryLoad,
}

impl ControllerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// A `path` that is given but missing is an error; without a path only
    /// defaults and environment variables apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path.to_path_buf()));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| EncoreError::config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EncoreError::config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !is_hex_color(&self.notification.color) {
            return Err(EncoreError::config(format!(
                "notification.color must be #RRGGBB, got {:?}",
                self.notification.color
            )));
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
