/// Track domain type
use serde::{Deserialize, Serialize};

/// A playable entry of the playlist
///
/// Tracks are supplied by the caller as an ordered sequence and never change
/// afterwards. Their position in that sequence is their playback order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    /// Location handed to the playback engine
    pub uri: String,

    /// Name shown in the UI and on the notification surface
    pub display_name: String,
}

impl Track {
    /// Create a new track
    pub fn new(uri: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            display_name: display_name.into(),
        }
    }
}
