//! Core types for playback management

use crate::error::PlaybackError;
use crate::strategy::{PlaybackStrategy, Repeat, Sequential, Shuffle, SmartShuffle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-item
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        })
    }
}

/// Built-in ordering policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Flattened order, then end
    #[default]
    Sequential,

    /// Seeded permutation, then end
    Shuffle,

    /// Seeded permutation spreading creators apart, then end
    SmartShuffle,

    /// Flattened order, cycling forever
    Repeat,
}

impl StrategyKind {
    /// Every built-in strategy, in demo order
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Sequential,
        StrategyKind::Shuffle,
        StrategyKind::SmartShuffle,
        StrategyKind::Repeat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Sequential => "sequential",
            StrategyKind::Shuffle => "shuffle",
            StrategyKind::SmartShuffle => "smart_shuffle",
            StrategyKind::Repeat => "repeat",
        }
    }

    /// Whether the strategy ever returns end for a non-empty playlist
    pub fn is_finite(&self) -> bool {
        !matches!(self, StrategyKind::Repeat)
    }

    /// Instantiate the strategy
    ///
    /// Shuffling strategies use `seed` when given and a random seed otherwise.
    pub fn build(self, seed: Option<u64>) -> Box<dyn PlaybackStrategy> {
        let seed = seed.unwrap_or_else(rand::random);
        match self {
            StrategyKind::Sequential => Box::new(Sequential::new()),
            StrategyKind::Shuffle => Box::new(Shuffle::new(seed)),
            StrategyKind::SmartShuffle => Box::new(SmartShuffle::new(seed)),
            StrategyKind::Repeat => Box::new(Repeat::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sequential" | "in_order" => Ok(StrategyKind::Sequential),
            "shuffle" | "random" => Ok(StrategyKind::Shuffle),
            "smart_shuffle" | "smart" => Ok(StrategyKind::SmartShuffle),
            "repeat" | "repeat_all" => Ok(StrategyKind::Repeat),
            _ => Err(PlaybackError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Configuration for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Maximum history size (default: 50)
    pub history_size: usize,

    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial strategy (default: Sequential)
    pub strategy: StrategyKind,

    /// Seed for shuffling strategies; random when unset
    pub seed: Option<u64>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            volume: 80,
            strategy: StrategyKind::Sequential,
            seed: None,
        }
    }
}

/// Listening analytics collected by the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListeningStats {
    /// Playlists bound so far
    pub sessions: u64,

    /// Items emitted across all sessions
    pub items_played: u64,

    /// Summed duration of emitted items, in seconds
    pub listened_secs: u64,
}

impl ListeningStats {
    pub(crate) fn record(&mut self, duration: Duration) {
        self.items_played = self.items_played.saturating_add(1);
        self.listened_secs = self.listened_secs.saturating_add(duration.as_secs());
    }

    /// Mean listening time per session, zero before the first session
    pub fn average_session_secs(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.listened_secs as f64 / self.sessions as f64
        }
    }
}

impl fmt::Display for ListeningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sessions: {} | Items played: {} | Listened: {}s | Average session: {:.1}s",
            self.sessions,
            self.items_played,
            self.listened_secs,
            self.average_session_secs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.history_size, 50);
        assert_eq!(config.volume, 80);
        assert_eq!(config.strategy, StrategyKind::Sequential);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn strategy_kind_parses_names_and_aliases() {
        assert_eq!("shuffle".parse::<StrategyKind>(), Ok(StrategyKind::Shuffle));
        assert_eq!("Smart-Shuffle".parse::<StrategyKind>(), Ok(StrategyKind::SmartShuffle));
        assert_eq!("repeat_all".parse::<StrategyKind>(), Ok(StrategyKind::Repeat));
        assert_eq!(
            "loop".parse::<StrategyKind>(),
            Err(PlaybackError::UnknownStrategy("loop".to_string()))
        );
    }

    #[test]
    fn strategy_kind_round_trips_through_display() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.to_string().parse::<StrategyKind>(), Ok(kind));
            assert_eq!(kind.build(Some(1)).name(), kind.as_str());
        }
    }

    #[test]
    fn only_repeat_is_infinite() {
        assert!(StrategyKind::Sequential.is_finite());
        assert!(StrategyKind::Shuffle.is_finite());
        assert!(StrategyKind::SmartShuffle.is_finite());
        assert!(!StrategyKind::Repeat.is_finite());
    }

    #[test]
    fn stats_average() {
        let mut stats = ListeningStats::default();
        assert_eq!(stats.average_session_secs(), 0.0);

        stats.sessions = 2;
        stats.record(Duration::from_secs(100));
        stats.record(Duration::from_secs(50));
        assert_eq!(stats.items_played, 2);
        assert_eq!(stats.listened_secs, 150);
        assert!((stats.average_session_secs() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_saturate_on_huge_durations() {
        let mut stats = ListeningStats::default();
        stats.record(Duration::from_secs(u64::MAX - 1));
        stats.record(Duration::from_secs(10));
        assert_eq!(stats.items_played, 2);
        assert_eq!(stats.listened_secs, u64::MAX);
    }
}
