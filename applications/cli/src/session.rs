/// Running one strategy over a playlist and reporting the result
use crate::error::Result;
use cadence_core::PlayableItem;
use cadence_playback::{ListeningStats, Player, PlayerConfig, StrategyKind};
use cadence_playlist::{Playlist, PlaylistSummary};
use serde::Serialize;
use std::io::Write;

/// Outcome of playing a playlist with one strategy
#[derive(Debug, Clone, Serialize)]
pub struct PlayReport {
    pub playlist: PlaylistSummary,
    pub strategy: &'static str,
    /// Seed used for shuffling, `None` when chosen at random
    pub seed: Option<u64>,
    pub items: Vec<PlayableItem>,
    /// Summed duration of the emitted items
    pub total_duration_secs: u64,
    pub stats: ListeningStats,
}

/// Play `playlist` with `kind`
///
/// `limit` caps the number of emitted items. Without it, finite strategies
/// run to their end and repeating ones stop after `repeat_limit` items.
pub fn play(
    playlist: &Playlist,
    kind: StrategyKind,
    player_config: PlayerConfig,
    limit: Option<usize>,
    repeat_limit: usize,
) -> PlayReport {
    let seed = player_config.seed;
    let mut player = Player::new(PlayerConfig {
        strategy: kind,
        ..player_config
    });
    player.bind(playlist);

    let limit = limit.unwrap_or(if kind.is_finite() {
        playlist.len()
    } else {
        repeat_limit
    });
    let items = player.drain(limit);
    tracing::info!(strategy = %kind, emitted = items.len(), "Playback finished");

    PlayReport {
        playlist: playlist.summary(),
        strategy: player.strategy_name(),
        seed: seed.filter(|_| matches!(kind, StrategyKind::Shuffle | StrategyKind::SmartShuffle)),
        total_duration_secs: items
            .iter()
            .fold(0u64, |total, i| total.saturating_add(i.duration().as_secs())),
        items,
        stats: player.stats(),
    }
}

/// Print the emitted sequence, one numbered line per item
pub fn write_sequence(out: &mut dyn Write, items: &[PlayableItem]) -> Result<()> {
    for (n, item) in items.iter().enumerate() {
        writeln!(out, "  {:>2}. {}", n + 1, item)?;
    }
    Ok(())
}

/// Human-readable report
pub fn write_text(out: &mut dyn Write, report: &PlayReport) -> Result<()> {
    writeln!(out, "{}", report.playlist)?;
    match report.seed {
        Some(seed) => writeln!(out, "Strategy: {} (seed {})", report.strategy, seed)?,
        None => writeln!(out, "Strategy: {}", report.strategy)?,
    }
    write_sequence(out, &report.items)?;
    writeln!(out, "Total duration: {}s", report.total_duration_secs)?;
    writeln!(out, "{}", report.stats)?;
    Ok(())
}

/// Pretty-printed JSON report
pub fn write_json(out: &mut dyn Write, report: &PlayReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{Descriptor, TrackFactory};

    fn playlist() -> Playlist {
        let mut factory = TrackFactory::with_builtin_kinds();
        let items = factory
            .create_all(&[
                Descriptor::new("song", "A", 120).with_extra("artist", "X"),
                Descriptor::new("song", "B", 60).with_extra("artist", "Y"),
                Descriptor::new("song", "C", 90).with_extra("artist", "Z"),
            ])
            .unwrap();
        Playlist::from_items("Test", items)
    }

    #[test]
    fn finite_strategy_runs_to_end() {
        let report = play(&playlist(), StrategyKind::Sequential, PlayerConfig::default(), None, 10);

        assert_eq!(report.strategy, "sequential");
        assert_eq!(report.items.len(), 3);
        assert_eq!(report.total_duration_secs, 270);
        assert_eq!(report.stats.items_played, 3);
        assert_eq!(report.seed, None);
    }

    #[test]
    fn repeat_is_bounded_by_repeat_limit() {
        let report = play(&playlist(), StrategyKind::Repeat, PlayerConfig::default(), None, 5);
        assert_eq!(report.items.len(), 5);
        assert_eq!(report.total_duration_secs, 120 + 60 + 90 + 120 + 60);

        let report = play(&playlist(), StrategyKind::Repeat, PlayerConfig::default(), Some(2), 5);
        assert_eq!(report.items.len(), 2);
    }

    #[test]
    fn huge_durations_saturate_in_report() {
        let mut factory = TrackFactory::with_builtin_kinds();
        let items = (0..3)
            .map(|n| {
                factory
                    .create(&Descriptor::new("song", format!("Endless {n}"), i64::MAX))
                    .unwrap()
            })
            .collect::<Vec<_>>();
        let playlist = Playlist::from_items("Huge", items);

        let report = play(&playlist, StrategyKind::Repeat, PlayerConfig::default(), None, 6);
        assert_eq!(report.items.len(), 6);
        assert_eq!(report.total_duration_secs, u64::MAX);
        assert_eq!(report.stats.listened_secs, u64::MAX);
        assert_eq!(report.playlist.total_duration_secs, u64::MAX);
    }

    #[test]
    fn text_report_lists_items() {
        let config = PlayerConfig {
            seed: Some(4),
            ..Default::default()
        };
        let report = play(&playlist(), StrategyKind::Shuffle, config, None, 10);

        let mut out = Vec::new();
        write_text(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Playlist: Test | Items: 3 | Groups: 0 | Duration: 270s\n"));
        assert!(text.contains("Strategy: shuffle (seed 4)"));
        assert!(text.contains("Total duration: 270s"));
        assert_eq!(text.lines().filter(|l| l.contains(". ")).count(), 3);
    }

    #[test]
    fn json_report_is_structured() {
        let report = play(&playlist(), StrategyKind::Sequential, PlayerConfig::default(), None, 10);

        let mut out = Vec::new();
        write_json(&mut out, &report).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["strategy"], "sequential");
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["items"][0]["title"], "A");
        assert_eq!(json["total_duration_secs"], 270);
        assert_eq!(json["playlist"]["items"], 3);
    }
}
