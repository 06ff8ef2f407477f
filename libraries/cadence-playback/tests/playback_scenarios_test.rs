//! End-to-end playback scenarios
//!
//! Descriptors go through the factory, into a nested playlist, and out
//! through each strategy in turn.

use cadence_core::{CadenceError, Descriptor, PlayableItem, TrackFactory};
use cadence_playback::{
    PlaybackError, PlaybackState, PlaybackStrategy, Player, PlayerConfig, PlayerEvent, Repeat,
    Sequential, Shuffle, StrategyKind,
};
use cadence_playlist::Playlist;
use std::time::Duration;

// ===== Test Helpers =====

/// [leaf("A",120), group[leaf("B",60), leaf("C",90)]]
fn scenario_playlist() -> Playlist {
    let mut factory = TrackFactory::with_builtin_kinds();
    let mut playlist = Playlist::new("Scenario");
    let root = playlist.root();

    let a = factory.create(&Descriptor::new("song", "A", 120)).unwrap();
    playlist.push_item(root, a).unwrap();

    let group = playlist.group("Group");
    playlist.add(root, group).unwrap();
    for (title, secs) in [("B", 60), ("C", 90)] {
        let item = factory.create(&Descriptor::new("song", title, secs)).unwrap();
        playlist.push_item(group, item).unwrap();
    }
    playlist
}

fn titles(items: &[PlayableItem]) -> Vec<String> {
    items.iter().map(|i| i.title().to_string()).collect()
}

// ===== Seed Scenarios =====

#[test]
fn test_sequential_over_nested_playlist() {
    let playlist = scenario_playlist();
    assert_eq!(playlist.total_duration(), Duration::from_secs(270));

    let mut strategy = Sequential::new();
    strategy.bind(&playlist);

    assert_eq!(strategy.next().unwrap().title(), "A");
    assert_eq!(strategy.next().unwrap().title(), "B");
    assert_eq!(strategy.next().unwrap().title(), "C");
    assert!(strategy.next().is_none());
}

#[test]
fn test_shuffle_with_seed_one_is_fixed() {
    let playlist = scenario_playlist();

    let runs: Vec<Vec<String>> = (0..3)
        .map(|_| {
            let mut strategy = Shuffle::new(1);
            strategy.bind(&playlist);
            let order = titles(&std::iter::from_fn(|| strategy.next()).take(10).collect::<Vec<_>>());
            assert!(strategy.next().is_none());
            order
        })
        .collect();

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);

    let mut sorted = runs[0].clone();
    sorted.sort();
    assert_eq!(sorted, ["A", "B", "C"]);
}

#[test]
fn test_repeat_single_leaf() {
    let mut factory = TrackFactory::with_builtin_kinds();
    let a = factory.create(&Descriptor::new("song", "A", 10)).unwrap();

    let mut strategy = Repeat::new();
    strategy.bind(&Playlist::from_items("Loop", [a]));

    for _ in 0..3 {
        assert_eq!(strategy.next().unwrap().title(), "A");
    }
}

#[test]
fn test_group_added_to_itself_is_rejected() {
    let mut playlist = scenario_playlist();
    let root = playlist.root();

    assert_eq!(
        playlist.add(root, root),
        Err(CadenceError::WouldCycle {
            parent: root,
            child: root
        })
    );
}

// ===== Player Scenarios =====

#[test]
fn test_player_cycles_through_all_strategies() {
    let playlist = scenario_playlist();
    let mut player = Player::new(PlayerConfig {
        seed: Some(1),
        ..Default::default()
    });
    player.bind(&playlist);

    for kind in StrategyKind::ALL {
        player.set_strategy_kind(kind);
        let emitted = player.drain(6);

        if kind.is_finite() {
            assert_eq!(emitted.len(), 3, "{kind} should end after one pass");
            assert_eq!(player.state(), PlaybackState::Stopped);
        } else {
            assert_eq!(titles(&emitted), ["A", "B", "C", "A", "B", "C"]);
            assert_eq!(player.state(), PlaybackState::Playing);
        }
    }

    let stats = player.stats();
    assert_eq!(stats.sessions, 1);
    assert_eq!(stats.items_played, 3 + 3 + 3 + 6);
    assert_eq!(stats.listened_secs, 270 * 5);
}

#[test]
fn test_switch_mid_playback_restarts_new_strategy() {
    let mut player = Player::default();
    player.bind(&scenario_playlist());
    player.set_strategy(Box::new(Repeat::new()));
    player.drain(4); // A B C A

    player.set_strategy(Box::new(Sequential::new()));
    assert_eq!(titles(&player.drain(10)), ["A", "B", "C"]);
}

#[test]
fn test_rebinding_picks_up_playlist_edits() {
    let mut playlist = scenario_playlist();
    let mut player = Player::default();
    player.bind(&playlist);

    let root = playlist.root();
    let group = playlist.children(root).unwrap()[1];
    assert!(playlist.remove(root, group).unwrap());

    // old snapshot still plays everything
    assert_eq!(player.drain(10).len(), 3);

    player.bind(&playlist);
    assert_eq!(titles(&player.drain(10)), ["A"]);
    assert_eq!(player.stats().sessions, 2);
}

#[test]
fn test_unbound_player_reports_not_bound() {
    let mut player = Player::default();
    assert_eq!(player.try_next(), Err(PlaybackError::NotBound));
    assert!(player.drain(5).is_empty());
}

#[test]
fn test_strategy_switch_is_announced() {
    let mut player = Player::default();
    player.bind(&scenario_playlist());
    player.drain_events();

    player.set_strategy_kind(StrategyKind::SmartShuffle);
    assert_eq!(
        player.drain_events(),
        vec![PlayerEvent::StrategyChanged {
            strategy: "smart_shuffle"
        }]
    );
}
