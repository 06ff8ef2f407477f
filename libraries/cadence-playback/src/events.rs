//! Player Events
//!
//! Event-based communication for front ends. Events are queued by the player
//! and collected with [`Player::drain_events`](crate::Player::drain_events).

use crate::types::PlaybackState;
use serde::Serialize;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// A playlist snapshot was bound
    PlaylistBound {
        /// Name of the bound playlist or group
        name: String,
        /// Number of items in the snapshot
        items: usize,
    },

    /// The strategy was replaced
    StrategyChanged {
        /// Name of the new strategy
        strategy: &'static str,
    },

    /// Player state changed (playing, paused, stopped)
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A new item became current
    ItemChanged {
        /// ID of the new (current) item
        item_id: String,
        /// ID of the previous item (if any)
        previous_item_id: Option<String>,
    },

    /// The strategy reported the end of the playlist
    PlaylistEnded,

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether output is muted
        is_muted: bool,
    },
}
