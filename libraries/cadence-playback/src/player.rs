//! Player - holds the current strategy and playback state
//!
//! Coordinates strategy, history, volume and listening stats

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    history::History,
    strategy::PlaybackStrategy,
    types::{ListeningStats, PlaybackState, PlayerConfig, StrategyKind},
    volume::Volume,
};
use cadence_core::{NodeId, PlayableItem};
use cadence_playlist::Playlist;
use serde::Serialize;
use std::fmt;

/// Snapshot of the player for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatus {
    pub state: PlaybackState,
    pub current_title: Option<String>,
    pub volume: u8,
    pub muted: bool,
    pub strategy: &'static str,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status: {} | Item: {} | Volume: {}{} | Strategy: {}",
            self.state,
            self.current_title.as_deref().unwrap_or("None"),
            self.volume,
            if self.muted { " (muted)" } else { "" },
            self.strategy
        )
    }
}

/// Music player
///
/// Owns one strategy at a time. Binding a playlist hands the strategy a
/// flattened snapshot; replacing the strategy rebinds the new one to that
/// same snapshot so it starts fresh.
///
/// # Example
///
/// ```rust
/// use cadence_core::{Descriptor, TrackFactory};
/// use cadence_playlist::Playlist;
/// use cadence_playback::{Player, Repeat};
///
/// let mut factory = TrackFactory::with_builtin_kinds();
/// let a = factory.create(&Descriptor::new("song", "A", 10)).unwrap();
///
/// let mut player = Player::default();
/// player.bind(&Playlist::from_items("Loop", [a]));
/// player.set_strategy(Box::new(Repeat::new()));
///
/// let titles: Vec<_> = player.drain(3).iter().map(|i| i.title().to_string()).collect();
/// assert_eq!(titles, ["A", "A", "A"]);
/// ```
#[derive(Debug)]
pub struct Player {
    strategy: Box<dyn PlaybackStrategy>,
    config: PlayerConfig,

    /// Flattened snapshot of the bound playlist
    source: Option<Vec<PlayableItem>>,

    current: Option<PlayableItem>,
    state: PlaybackState,

    history: History,
    volume: Volume,
    stats: ListeningStats,

    // Event queue for front ends
    pending_events: Vec<PlayerEvent>,
}

impl Player {
    /// Create a new player
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            strategy: config.strategy.build(config.seed),
            history: History::new(config.history_size),
            volume: Volume::new(config.volume),
            source: None,
            current: None,
            state: PlaybackState::Stopped,
            stats: ListeningStats::default(),
            pending_events: Vec::new(),
            config,
        }
    }

    // ===== Source =====

    /// Bind a playlist
    ///
    /// Snapshots the flattened playlist, binds the strategy to it and stops
    /// playback. Later edits to the playlist are not seen until the next bind.
    pub fn bind(&mut self, playlist: &Playlist) {
        self.bind_items(playlist.name().to_string(), playlist.flatten());
    }

    /// Bind a single node (leaf or group) of a playlist
    pub fn bind_node(&mut self, playlist: &Playlist, node: NodeId) -> Result<()> {
        let items = playlist.flatten_node(node)?;
        self.bind_items(format!("{} / {}", playlist.name(), node), items);
        Ok(())
    }

    fn bind_items(&mut self, name: String, items: Vec<PlayableItem>) {
        tracing::debug!(playlist = %name, items = items.len(), "Bound playlist");
        self.pending_events.push(PlayerEvent::PlaylistBound {
            name,
            items: items.len(),
        });

        self.strategy.load(items.clone());
        self.source = Some(items);
        self.stats.sessions += 1;
        self.finish_current();
        self.set_state(PlaybackState::Stopped);
    }

    /// Whether a playlist is bound
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    // ===== Strategy =====

    /// Replace the strategy
    ///
    /// The new strategy starts fresh against the currently bound snapshot.
    /// The current item, if any, stays current.
    pub fn set_strategy(&mut self, mut strategy: Box<dyn PlaybackStrategy>) {
        if let Some(items) = &self.source {
            strategy.load(items.clone());
        }
        tracing::debug!(from = self.strategy.name(), to = strategy.name(), "Switched strategy");
        self.pending_events.push(PlayerEvent::StrategyChanged {
            strategy: strategy.name(),
        });
        self.strategy = strategy;
    }

    /// Replace the strategy with a built-in one, seeded from the config
    pub fn set_strategy_kind(&mut self, kind: StrategyKind) {
        self.set_strategy(kind.build(self.config.seed));
    }

    /// Name of the active strategy
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    // ===== Playback Control =====

    /// Advance to the next item chosen by the strategy
    ///
    /// Returns `None` at the end of the playlist or when nothing is bound.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<PlayableItem> {
        if !self.is_bound() {
            return None;
        }

        match self.strategy.next() {
            Some(item) => {
                let previous = self.current.replace(item.clone());
                self.pending_events.push(PlayerEvent::ItemChanged {
                    item_id: item.id().to_string(),
                    previous_item_id: previous.as_ref().map(|p| p.id().to_string()),
                });
                if let Some(previous) = previous {
                    self.history.push(previous);
                }
                self.stats.record(item.duration());
                self.set_state(PlaybackState::Playing);
                Some(item)
            }
            None => {
                if self.state != PlaybackState::Stopped || self.current.is_some() {
                    self.pending_events.push(PlayerEvent::PlaylistEnded);
                }
                self.finish_current();
                self.set_state(PlaybackState::Stopped);
                None
            }
        }
    }

    /// Like [`Player::next`], but fails when no playlist is bound
    pub fn try_next(&mut self) -> Result<Option<PlayableItem>> {
        if !self.is_bound() {
            return Err(PlaybackError::NotBound);
        }
        Ok(self.next())
    }

    /// Collect up to `limit` items
    ///
    /// Stops early at the end of the playlist. This is the external bound
    /// needed for strategies that never end.
    pub fn drain(&mut self, limit: usize) -> Vec<PlayableItem> {
        let mut items = Vec::with_capacity(limit.min(1024));
        while items.len() < limit {
            match self.next() {
                Some(item) => items.push(item),
                None => break,
            }
        }
        items
    }

    /// Go back to the most recently played item
    ///
    /// The strategy's position is left untouched; `next` continues where
    /// it was.
    pub fn previous(&mut self) -> Option<PlayableItem> {
        let item = self.history.pop()?;
        let previous = self.current.replace(item.clone());
        self.pending_events.push(PlayerEvent::ItemChanged {
            item_id: item.id().to_string(),
            previous_item_id: previous.map(|p| p.id().to_string()),
        });
        self.set_state(PlaybackState::Playing);
        Some(item)
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Resume after pause
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.set_state(PlaybackState::Playing);
        }
    }

    /// Stop playback
    ///
    /// Clears the current item and rewinds the strategy to its start.
    pub fn stop(&mut self) {
        self.finish_current();
        self.strategy.reset();
        self.set_state(PlaybackState::Stopped);
    }

    fn finish_current(&mut self) {
        if let Some(item) = self.current.take() {
            self.history.push(item);
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlayerEvent::StateChanged { state });
        }
    }

    // ===== Volume =====

    /// Set volume (0-100, clamped)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        tracing::debug!(level = self.volume.level(), "Volume set");
        self.emit_volume_changed();
    }

    pub fn mute(&mut self) {
        self.volume.mute();
        self.emit_volume_changed();
    }

    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.emit_volume_changed();
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Level actually heard, zero while muted
    pub fn effective_volume(&self) -> u8 {
        self.volume.effective_level()
    }

    /// Raise the volume by `step`
    pub fn volume_up(&mut self, step: u8) {
        self.volume.raise(step);
        self.emit_volume_changed();
    }

    /// Lower the volume by `step`
    pub fn volume_down(&mut self, step: u8) {
        self.volume.lower(step);
        self.emit_volume_changed();
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current(&self) -> Option<&PlayableItem> {
        self.current.as_ref()
    }

    /// Previously played items (oldest first)
    pub fn history(&self) -> Vec<&PlayableItem> {
        self.history.iter().collect()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn stats(&self) -> ListeningStats {
        self.stats
    }

    pub fn status(&self) -> PlayerStatus {
        PlayerStatus {
            state: self.state,
            current_title: self.current.as_ref().map(|i| i.title().to_string()),
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            strategy: self.strategy.name(),
        }
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
