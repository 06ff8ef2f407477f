//! Playback strategies
//!
//! A strategy turns a flattened playlist into a stream of items. Strategies
//! are plain values: the player swaps them by assignment.

use crate::shuffle::{shuffle_random, shuffle_smart};
use cadence_core::PlayableItem;
use cadence_playlist::Playlist;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Debug;

/// Ordering policy over a bound playlist
///
/// `next` returning `None` marks the end of playback. A strategy only ever
/// emits items from the snapshot it was bound to.
pub trait PlaybackStrategy: Debug {
    /// Short identifier, matching [`StrategyKind`](crate::StrategyKind) names
    fn name(&self) -> &'static str;

    /// Replace the source with an already flattened list and start over
    fn load(&mut self, items: Vec<PlayableItem>);

    /// Bind to a playlist, snapshotting its flattened order
    fn bind(&mut self, playlist: &Playlist) {
        self.load(playlist.flatten());
    }

    /// Advance by the policy
    fn next(&mut self) -> Option<PlayableItem>;

    /// Start over against the current source
    fn reset(&mut self);
}

/// Emits items in flattened order, then ends
#[derive(Debug, Clone, Default)]
pub struct Sequential {
    items: Vec<PlayableItem>,
    cursor: usize,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackStrategy for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn load(&mut self, items: Vec<PlayableItem>) {
        self.items = items;
        self.cursor = 0;
    }

    fn next(&mut self) -> Option<PlayableItem> {
        let item = self.items.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(item)
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Emits every item exactly once in a seeded random order, then ends
///
/// The same seed over the same playlist always yields the same order.
#[derive(Debug, Clone)]
pub struct Shuffle {
    seed: u64,
    order: Vec<PlayableItem>,
    cursor: usize,
}

impl Shuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            order: Vec::new(),
            cursor: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PlaybackStrategy for Shuffle {
    fn name(&self) -> &'static str {
        "shuffle"
    }

    fn load(&mut self, mut items: Vec<PlayableItem>) {
        shuffle_random(&mut items, &mut StdRng::seed_from_u64(self.seed));
        self.order = items;
        self.cursor = 0;
    }

    fn next(&mut self) -> Option<PlayableItem> {
        let item = self.order.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(item)
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Like [`Shuffle`], but keeps items by the same creator apart
#[derive(Debug, Clone)]
pub struct SmartShuffle {
    seed: u64,
    order: Vec<PlayableItem>,
    cursor: usize,
}

impl SmartShuffle {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            order: Vec::new(),
            cursor: 0,
        }
    }
}

impl PlaybackStrategy for SmartShuffle {
    fn name(&self) -> &'static str {
        "smart_shuffle"
    }

    fn load(&mut self, mut items: Vec<PlayableItem>) {
        shuffle_smart(&mut items, &mut StdRng::seed_from_u64(self.seed));
        self.order = items;
        self.cursor = 0;
    }

    fn next(&mut self) -> Option<PlayableItem> {
        let item = self.order.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(item)
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Emits items in flattened order, wrapping around forever
///
/// Never ends unless the playlist is empty; callers bound it externally.
#[derive(Debug, Clone, Default)]
pub struct Repeat {
    items: Vec<PlayableItem>,
    cursor: usize,
}

impl Repeat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlaybackStrategy for Repeat {
    fn name(&self) -> &'static str {
        "repeat"
    }

    fn load(&mut self, items: Vec<PlayableItem>) {
        self.items = items;
        self.cursor = 0;
    }

    fn next(&mut self) -> Option<PlayableItem> {
        let item = self.items.get(self.cursor).cloned()?;
        self.cursor = (self.cursor + 1) % self.items.len();
        Some(item)
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{Descriptor, TrackFactory};

    /// [A(120), [B(60), C(90)]]
    fn nested_playlist() -> Playlist {
        let mut factory = TrackFactory::with_builtin_kinds();
        let mut playlist = Playlist::new("Nested");
        let root = playlist.root();
        let a = factory.create(&Descriptor::new("song", "A", 120)).unwrap();
        playlist.push_item(root, a).unwrap();
        let group = playlist.group("Inner");
        playlist.add(root, group).unwrap();
        for (title, secs) in [("B", 60), ("C", 90)] {
            let item = factory.create(&Descriptor::new("song", title, secs)).unwrap();
            playlist.push_item(group, item).unwrap();
        }
        playlist
    }

    fn drain(strategy: &mut dyn PlaybackStrategy, limit: usize) -> Vec<String> {
        std::iter::from_fn(|| strategy.next())
            .take(limit)
            .map(|item| item.title().to_string())
            .collect()
    }

    #[test]
    fn sequential_emits_in_order_then_ends() {
        let mut strategy = Sequential::new();
        strategy.bind(&nested_playlist());

        assert_eq!(drain(&mut strategy, 10), ["A", "B", "C"]);
        assert!(strategy.next().is_none());
        // End is sticky
        assert!(strategy.next().is_none());
    }

    #[test]
    fn unbound_strategies_end_immediately() {
        assert!(Sequential::new().next().is_none());
        assert!(Shuffle::new(1).next().is_none());
        assert!(SmartShuffle::new(1).next().is_none());
        assert!(Repeat::new().next().is_none());
    }

    #[test]
    fn shuffle_is_deterministic_for_a_seed() {
        let playlist = nested_playlist();

        let mut first = Shuffle::new(1);
        first.bind(&playlist);
        let mut second = Shuffle::new(1);
        second.bind(&playlist);

        let order = drain(&mut first, 10);
        assert_eq!(order, drain(&mut second, 10));
        assert!(first.next().is_none());

        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, ["A", "B", "C"]);
    }

    #[test]
    fn shuffle_reset_replays_same_order() {
        let mut strategy = Shuffle::new(42);
        strategy.bind(&nested_playlist());
        let first = drain(&mut strategy, 10);

        strategy.reset();
        assert_eq!(drain(&mut strategy, 10), first);
        assert_eq!(strategy.seed(), 42);
    }

    #[test]
    fn repeat_cycles_forever() {
        let mut strategy = Repeat::new();
        strategy.bind(&nested_playlist());

        assert_eq!(
            drain(&mut strategy, 7),
            ["A", "B", "C", "A", "B", "C", "A"]
        );
    }

    #[test]
    fn repeat_single_item() {
        let mut factory = TrackFactory::with_builtin_kinds();
        let a = factory.create(&Descriptor::new("song", "A", 10)).unwrap();
        let mut strategy = Repeat::new();
        strategy.bind(&Playlist::from_items("One", [a]));

        assert_eq!(drain(&mut strategy, 3), ["A", "A", "A"]);
    }

    #[test]
    fn repeat_over_empty_playlist_ends() {
        let mut strategy = Repeat::new();
        strategy.bind(&Playlist::new("Empty"));
        assert!(strategy.next().is_none());
    }

    #[test]
    fn rebinding_starts_fresh() {
        let playlist = nested_playlist();
        let mut strategy = Sequential::new();
        strategy.bind(&playlist);
        strategy.next();
        strategy.next();

        strategy.bind(&playlist);
        assert_eq!(drain(&mut strategy, 10), ["A", "B", "C"]);
    }

    #[test]
    fn bound_snapshot_ignores_later_playlist_edits() {
        let mut playlist = nested_playlist();
        let mut strategy = Sequential::new();
        strategy.bind(&playlist);

        let root = playlist.root();
        let first = playlist.children(root).unwrap()[0];
        playlist.remove(root, first).unwrap();

        assert_eq!(drain(&mut strategy, 10), ["A", "B", "C"]);
    }
}
