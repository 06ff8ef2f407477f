/// CLI configuration
use crate::error::{CliError, Result};
use cadence_core::Descriptor;
use cadence_playback::{PlayerConfig, StrategyKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    /// Items to play; empty means the built-in demo catalog
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Fixed shuffle seed; random per run when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Items emitted by strategies that never end on their own
    #[serde(default = "default_repeat_limit")]
    pub repeat_limit: usize,

    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default = "default_history_size")]
    pub history_size: usize,

    #[serde(default)]
    pub strategy: StrategyKind,
}

/// One catalog item, optionally placed in a named group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogEntry {
    /// Group under the playlist root; top level when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(flatten)]
    pub descriptor: Descriptor,
}

impl CatalogEntry {
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            group: None,
            descriptor,
        }
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `cadence.toml` in the
    /// working directory is used when present. `CADENCE_` environment
    /// variables override both, with `__` separating sections
    /// (`CADENCE_PLAYBACK__SEED=7`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            catalog = config.catalog.len(),
            strategy = %config.playback.strategy,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CliError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.volume > 100 {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 100 (got {})",
                self.playback.volume
            )));
        }

        if self.playback.repeat_limit == 0 {
            return Err(CliError::Config(
                "playback.repeat_limit must be at least 1".to_string(),
            ));
        }

        if self.playback.history_size == 0 {
            return Err(CliError::Config(
                "playback.history_size must be at least 1".to_string(),
            ));
        }

        if let Some(entry) = self
            .catalog
            .iter()
            .find(|entry| entry.group.as_deref().is_some_and(|g| g.trim().is_empty()))
        {
            return Err(CliError::Config(format!(
                "catalog entry {:?} has a blank group name",
                entry.descriptor.title
            )));
        }

        Ok(())
    }

    /// Settings for a new player
    pub fn player_config(&self) -> PlayerConfig {
        PlayerConfig {
            history_size: self.playback.history_size,
            volume: self.playback.volume,
            strategy: self.playback.strategy,
            seed: self.playback.seed,
        }
    }
}

// Default values
fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        seed: None,
        repeat_limit: default_repeat_limit(),
        volume: default_volume(),
        history_size: default_history_size(),
        strategy: StrategyKind::default(),
    }
}

fn default_repeat_limit() -> usize {
    10
}

fn default_volume() -> u8 {
    80
}

fn default_history_size() -> usize {
    50
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        default_playback()
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            playback: default_playback(),
            catalog: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playback.repeat_limit, 10);
        assert_eq!(config.playback.strategy, StrategyKind::Sequential);
        assert!(config.catalog.is_empty());
    }

    #[test]
    fn parses_catalog_with_groups() {
        let config = CliConfig::from_toml(
            r#"
            [playback]
            seed = 42
            strategy = "smart_shuffle"

            [[catalog]]
            kind = "song"
            title = "Imagine"
            duration = 183
            extras = { artist = "John Lennon", format = "flac" }

            [[catalog]]
            group = "Talk"
            kind = "podcast"
            title = "Episode 12"
            duration = 1800
            "#,
        )
        .unwrap();

        assert_eq!(config.playback.seed, Some(42));
        assert_eq!(config.playback.strategy, StrategyKind::SmartShuffle);
        assert_eq!(config.playback.volume, 80);
        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.catalog[0].group, None);
        assert_eq!(config.catalog[0].descriptor.extra("artist"), Some("John Lennon"));
        assert_eq!(config.catalog[1].group.as_deref(), Some("Talk"));
        assert_eq!(config.catalog[1].descriptor.duration, 1800);
    }

    #[test]
    fn rejects_out_of_range_settings() {
        let err = CliConfig::from_toml("[playback]\nvolume = 120").unwrap_err();
        assert!(err.to_string().contains("playback.volume"));

        let err = CliConfig::from_toml("[playback]\nrepeat_limit = 0").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn player_config_mirrors_settings() {
        let mut config = CliConfig::default();
        config.playback.seed = Some(3);
        config.playback.volume = 55;

        let player = config.player_config();
        assert_eq!(player.seed, Some(3));
        assert_eq!(player.volume, 55);
        assert_eq!(player.history_size, 50);
    }
}
