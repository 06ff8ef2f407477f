/// Descriptor consumed by the track factory
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration record describing one playable item
///
/// `duration` is signed so that negative input survives deserialization and
/// can be rejected by the factory with a proper diagnostic.
///
/// # Example
///
/// ```rust
/// use cadence_core::Descriptor;
///
/// let descriptor = Descriptor::new("song", "Bohemian Rhapsody", 355)
///     .with_extra("artist", "Queen")
///     .with_extra("format", "flac");
///
/// assert_eq!(descriptor.extras.get("artist").map(String::as_str), Some("Queen"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Kind tag selecting the concrete variant (`song`, `podcast`, `ad`, ...)
    pub kind: String,

    /// Explicit identity; the factory assigns one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display title, must not be blank
    pub title: String,

    /// Duration in seconds, must not be negative
    pub duration: i64,

    /// Kind-specific options such as `artist` for songs or `host` for podcasts
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extras: BTreeMap<String, String>,
}

impl Descriptor {
    /// Create a descriptor without extras
    pub fn new(kind: impl Into<String>, title: impl Into<String>, duration: i64) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            title: title.into(),
            duration,
            extras: BTreeMap::new(),
        }
    }

    /// Set an explicit identity
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a kind-specific option
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Non-blank value of an extra
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_extras_read_as_absent() {
        let descriptor = Descriptor::new("song", "A", 120).with_extra("artist", "   ");
        assert_eq!(descriptor.extra("artist"), None);
        assert_eq!(descriptor.extra("album"), None);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"kind":"song","title":"A","duration":120}"#).unwrap();
        assert_eq!(descriptor, Descriptor::new("song", "A", 120));
    }

    #[test]
    fn keeps_negative_duration_for_validation() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"kind":"ad","title":"Spot","duration":-5}"#).unwrap();
        assert_eq!(descriptor.duration, -5);
    }
}
