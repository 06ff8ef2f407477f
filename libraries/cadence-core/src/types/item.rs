/// Playable item domain types
use super::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Kind tag of a playable item
///
/// The set is open: the track factory accepts any kind that has been
/// registered with it. The built-in kinds are exposed as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemKind(&'static str);

impl ItemKind {
    /// Music track
    pub const SONG: Self = Self("song");

    /// Podcast episode
    pub const PODCAST: Self = Self("podcast");

    /// Advertisement spot
    pub const AD: Self = Self("ad");

    /// Create a custom kind tag
    pub const fn new(tag: &'static str) -> Self {
        Self(tag)
    }

    /// Tag string as used in descriptors
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Delivery format of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Flac,
    Streaming,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::Streaming => "streaming",
        }
    }

    /// One-line description shown next to the track
    pub fn description(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "lossy compression, smaller file size",
            AudioFormat::Flac => "lossless compression, high quality audio",
            AudioFormat::Streaming => "adaptive bitrate, network dependent",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "flac" => Ok(AudioFormat::Flac),
            "streaming" | "stream" => Ok(AudioFormat::Streaming),
            other => Err(format!("unsupported audio format `{other}`")),
        }
    }
}

/// Kind-specific attributes of a playable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemDetails {
    /// Music track
    Song {
        artist: Option<String>,
        album: Option<String>,
        format: AudioFormat,
    },

    /// Podcast episode
    Podcast {
        host: Option<String>,
        episode: Option<u32>,
    },

    /// Advertisement; `skippable_after_secs` is `None` for unskippable spots
    Ad {
        advertiser: Option<String>,
        skippable_after_secs: Option<u64>,
    },

    /// Attributes of a kind registered outside this crate
    Custom { extras: BTreeMap<String, String> },
}

impl ItemDetails {
    /// The person or company behind the item, if known
    ///
    /// Used to spread items from the same creator apart when shuffling.
    pub fn creator(&self) -> Option<&str> {
        match self {
            ItemDetails::Song { artist, .. } => artist.as_deref(),
            ItemDetails::Podcast { host, .. } => host.as_deref(),
            ItemDetails::Ad { advertiser, .. } => advertiser.as_deref(),
            ItemDetails::Custom { extras } => extras.get("creator").map(String::as_str),
        }
    }
}

/// Something the player can emit: a song, a podcast episode, an ad, ...
///
/// Immutable after construction. Only the track factory builds these, which
/// guarantees a non-empty title for every item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayableItem {
    id: ItemId,
    title: String,
    #[serde(rename = "duration_secs", serialize_with = "serialize_secs")]
    duration: Duration,
    kind: ItemKind,
    details: ItemDetails,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}

impl PlayableItem {
    pub(crate) fn new(
        id: ItemId,
        title: String,
        duration: Duration,
        kind: ItemKind,
        details: ItemDetails,
    ) -> Self {
        Self {
            id,
            title,
            duration,
            kind,
            details,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Playing time, always a whole number of seconds
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn details(&self) -> &ItemDetails {
        &self.details
    }

    pub fn creator(&self) -> Option<&str> {
        self.details.creator()
    }
}

impl fmt::Display for PlayableItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(creator) = self.creator() {
            write!(f, " - {creator}")?;
        }
        write!(f, " ({}s, {})", self.duration.as_secs(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(artist: Option<&str>) -> PlayableItem {
        PlayableItem::new(
            ItemId::new("song-1"),
            "Imagine".to_string(),
            Duration::from_secs(183),
            ItemKind::SONG,
            ItemDetails::Song {
                artist: artist.map(str::to_string),
                album: None,
                format: AudioFormat::Flac,
            },
        )
    }

    #[test]
    fn display_includes_creator_when_known() {
        assert_eq!(
            song(Some("John Lennon")).to_string(),
            "Imagine - John Lennon (183s, song)"
        );
        assert_eq!(song(None).to_string(), "Imagine (183s, song)");
    }

    #[test]
    fn audio_format_parses_aliases() {
        assert_eq!("FLAC".parse::<AudioFormat>(), Ok(AudioFormat::Flac));
        assert_eq!("stream".parse::<AudioFormat>(), Ok(AudioFormat::Streaming));
        assert!("ogg".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn serializes_duration_as_seconds() {
        let json = serde_json::to_value(song(Some("John Lennon"))).unwrap();
        assert_eq!(json["duration_secs"], 183);
        assert_eq!(json["kind"], "song");
        assert_eq!(json["details"]["type"], "song");
        assert_eq!(json["details"]["format"], "flac");
    }

    #[test]
    fn custom_creator_comes_from_extras() {
        let mut extras = BTreeMap::new();
        extras.insert("creator".to_string(), "Narrator".to_string());
        let details = ItemDetails::Custom { extras };
        assert_eq!(details.creator(), Some("Narrator"));
    }
}
