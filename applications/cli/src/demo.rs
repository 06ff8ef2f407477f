/// Guided walkthrough of the factory, playlist and strategies
use crate::catalog::{build_playlist, demo_catalog};
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use crate::session::{play, write_sequence};
use cadence_core::{CadenceError, Descriptor, ItemDetails, NodeId, TrackFactory};
use cadence_playback::{Player, StrategyKind};
use cadence_playlist::{Playlist, PlaylistNode};
use std::io::Write;

const PLAYLIST_NAME: &str = "Demo Mix";

/// Run the walkthrough, writing everything to `out`
pub fn run(config: &CliConfig, out: &mut dyn Write) -> Result<()> {
    let mut factory = TrackFactory::with_builtin_kinds();
    let kinds: Vec<_> = factory
        .registered_kinds()
        .iter()
        .map(|k| k.kind.as_str())
        .collect();
    writeln!(out, "== Item kinds ==")?;
    writeln!(out, "{}", kinds.join(", "))?;

    let entries = if config.catalog.is_empty() {
        demo_catalog()
    } else {
        config.catalog.clone()
    };
    let playlist = build_playlist(&mut factory, PLAYLIST_NAME, &entries)?;

    writeln!(out)?;
    writeln!(out, "== Playlist ==")?;
    writeln!(out, "{}", playlist.summary())?;
    write_tree(out, &playlist, playlist.root(), 1)?;

    for kind in StrategyKind::ALL {
        let report = play(
            &playlist,
            kind,
            config.player_config(),
            None,
            config.playback.repeat_limit,
        );

        writeln!(out)?;
        match report.seed {
            Some(seed) => writeln!(out, "== {} (seed {}) ==", report.strategy, seed)?,
            None if kind.is_finite() => writeln!(out, "== {} ==", report.strategy)?,
            None => writeln!(
                out,
                "== {} (first {} items) ==",
                report.strategy,
                report.items.len()
            )?,
        }
        write_sequence(out, &report.items)?;
        writeln!(out, "Total duration: {}s", report.total_duration_secs)?;
    }

    writeln!(out)?;
    writeln!(out, "== Player ==")?;
    let mut player = Player::new(config.player_config());
    player.bind(&playlist);
    player.drain(2);
    player.set_strategy_kind(StrategyKind::Repeat);
    player.pause();
    writeln!(out, "{}", player.status())?;
    writeln!(out, "{}", player.stats())?;

    writeln!(out)?;
    writeln!(out, "== Errors ==")?;
    let mut playlist = playlist;
    report_rejection(out, "Group added to itself", cycle_attempt(&mut playlist))?;
    report_rejection(
        out,
        "Untitled song",
        factory.create(&Descriptor::new("song", "  ", 200)).map(drop),
    )?;
    report_rejection(
        out,
        "Negative duration",
        factory
            .create(&Descriptor::new("podcast", "Time Travel", -5))
            .map(drop),
    )?;

    Ok(())
}

/// Try to nest the first group inside itself (or the root when there is none)
fn cycle_attempt(playlist: &mut Playlist) -> std::result::Result<(), CadenceError> {
    let root = playlist.root();
    let target = playlist
        .children(root)?
        .iter()
        .copied()
        .find(|&id| playlist.node(id).is_ok_and(|node| node.is_group()))
        .unwrap_or(root);
    playlist.add(target, target)
}

fn report_rejection(
    out: &mut dyn Write,
    label: &str,
    outcome: std::result::Result<(), CadenceError>,
) -> Result<()> {
    match outcome {
        Err(err) => {
            writeln!(out, "{label}: rejected [{}] {err}", err.kind())?;
            Ok(())
        }
        Ok(()) => Err(CliError::Config(format!(
            "{label}: expected a rejection but the operation succeeded"
        ))),
    }
}

fn write_tree(out: &mut dyn Write, playlist: &Playlist, id: NodeId, depth: usize) -> Result<()> {
    for &child in playlist.children(id)? {
        let indent = "  ".repeat(depth);
        match playlist.node(child)? {
            PlaylistNode::Leaf(item) => match item.details() {
                ItemDetails::Song { format, .. } => {
                    writeln!(out, "{indent}- {item} [{format}: {}]", format.description())?;
                }
                _ => writeln!(out, "{indent}- {item}")?,
            },
            PlaylistNode::Group { name, .. } => {
                let secs = playlist.total_duration_node(child)?.as_secs();
                writeln!(out, "{indent}+ {name} ({secs}s)")?;
                write_tree(out, playlist, child, depth + 1)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogEntry;

    fn run_to_string(config: &CliConfig) -> String {
        let mut out = Vec::new();
        run(config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn walkthrough_covers_every_strategy() {
        let mut config = CliConfig::default();
        config.playback.seed = Some(42);
        let text = run_to_string(&config);

        assert!(text.contains("ad, podcast, song"));
        assert!(text.contains("Playlist: Demo Mix | Items: 7 | Groups: 2 | Duration: 3057s"));
        assert!(text.contains("  + Rock Classics (1229s)"));
        assert!(text.contains(
            "  - Bohemian Rhapsody - Queen (355s, song) [flac: lossless compression, high quality audio]"
        ));
        assert!(text.contains(
            "    - Hotel California - Eagles (391s, song) [streaming: adaptive bitrate, network dependent]"
        ));
        assert!(text.contains(
            "    - Sweet Child O' Mine - Guns N' Roses (356s, song) [mp3: lossy compression, smaller file size]"
        ));
        assert!(text.contains("    - Behind the Riff - Dana Cole (1260s, podcast)\n"));
        assert!(text.contains("== sequential =="));
        assert!(text.contains("== shuffle (seed 42) =="));
        assert!(text.contains("== smart_shuffle (seed 42) =="));
        assert!(text.contains("== repeat (first 10 items) =="));
        assert!(text.contains("Status: Paused | Item: Imagine"));
    }

    #[test]
    fn walkthrough_reports_each_error_kind() {
        let text = run_to_string(&CliConfig::default());

        assert!(text.contains("Group added to itself: rejected [would_cycle]"));
        assert!(text.contains("Untitled song: rejected [invalid_descriptor]"));
        assert!(text.contains("Negative duration: rejected [invalid_descriptor]"));
    }

    #[test]
    fn configured_catalog_replaces_builtin_one() {
        let mut config = CliConfig::default();
        config.playback.repeat_limit = 3;
        config.catalog = vec![CatalogEntry::new(Descriptor::new("song", "Only", 42))];
        let text = run_to_string(&config);

        assert!(text.contains("Playlist: Demo Mix | Items: 1 | Groups: 0 | Duration: 42s"));
        assert!(text.contains("== repeat (first 3 items) =="));
        // no groups, so the cycle check falls back to the root
        assert!(text.contains("Group added to itself: rejected [would_cycle]"));
    }
}
