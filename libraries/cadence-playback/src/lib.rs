//! Cadence - Playback
//!
//! Strategies that turn a playlist into a stream of items, and the player
//! that holds one of them at a time.
//!
//! This crate provides:
//! - Playback strategies (Sequential, Shuffle, Smart shuffle, Repeat)
//! - Seeded shuffle algorithms (Random + Smart)
//! - A player with runtime strategy swapping
//! - Playback history (configurable size)
//! - Volume control (clamped 0-100%, stepping, mute/unmute)
//! - Listening stats and player events
//!
//! # Example: Swapping strategies
//!
//! ```rust
//! use cadence_core::{Descriptor, TrackFactory};
//! use cadence_playlist::Playlist;
//! use cadence_playback::{Player, PlayerConfig, StrategyKind};
//!
//! let mut factory = TrackFactory::with_builtin_kinds();
//! let items = factory
//!     .create_all(&[
//!         Descriptor::new("song", "A", 120),
//!         Descriptor::new("song", "B", 60),
//!         Descriptor::new("song", "C", 90),
//!     ])
//!     .unwrap();
//!
//! let mut player = Player::new(PlayerConfig {
//!     seed: Some(1),
//!     ..Default::default()
//! });
//! player.bind(&Playlist::from_items("Mix", items));
//!
//! // Sequential: A, B, C, then end
//! assert_eq!(player.drain(10).len(), 3);
//!
//! // Shuffle: every item exactly once, order fixed by the seed
//! player.set_strategy_kind(StrategyKind::Shuffle);
//! assert_eq!(player.drain(10).len(), 3);
//!
//! // Repeat never ends on its own
//! player.set_strategy_kind(StrategyKind::Repeat);
//! assert_eq!(player.drain(7).len(), 7);
//! ```

mod error;
mod events;
mod history;
mod player;
mod shuffle;
pub mod strategy;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use history::History;
pub use player::{Player, PlayerStatus};
pub use strategy::{PlaybackStrategy, Repeat, Sequential, Shuffle, SmartShuffle};
pub use types::{ListeningStats, PlaybackState, PlayerConfig, StrategyKind};
