//! Track Factory - registry-based construction of playable items
//!
//! Kind tags map to constructor closures registered at startup, so adding a
//! new kind of item never touches the call sites that create items.

use crate::error::{CadenceError, Result};
use crate::types::{AudioFormat, Descriptor, ItemDetails, ItemId, ItemKind, PlayableItem};
use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Constructor for the kind-specific part of an item
///
/// Receives the full descriptor after the common fields were validated.
pub type BuildFn = Arc<dyn Fn(&Descriptor) -> Result<ItemDetails> + Send + Sync>;

/// Registration entry for one item kind
#[derive(Clone)]
pub struct KindRegistration {
    /// Kind tag matched against `Descriptor::kind`
    pub kind: ItemKind,
    /// Human-readable name
    pub display_name: &'static str,
    /// Build the kind-specific attributes
    pub build: BuildFn,
}

impl Debug for KindRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindRegistration")
            .field("kind", &self.kind)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// Registry of item kinds and the only construction site for `PlayableItem`
///
/// # Example
///
/// ```rust
/// use cadence_core::{Descriptor, ItemKind, TrackFactory};
///
/// let mut factory = TrackFactory::with_builtin_kinds();
/// let item = factory
///     .create(&Descriptor::new("song", "A", 120).with_extra("artist", "Queen"))
///     .unwrap();
///
/// assert_eq!(item.title(), "A");
/// assert_eq!(item.kind(), ItemKind::SONG);
/// assert_eq!(item.id().as_str(), "song-1");
/// ```
#[derive(Debug)]
pub struct TrackFactory {
    kinds: HashMap<&'static str, KindRegistration>,
    /// Serial number for generated ids
    next_serial: u64,
}

impl Default for TrackFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackFactory {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            next_serial: 1,
        }
    }

    /// Create a registry with song, podcast and ad registered
    pub fn with_builtin_kinds() -> Self {
        let mut factory = Self::new();
        factory.register_builtin_kinds();
        factory
    }

    /// Register a kind, replacing any previous registration for the same tag
    pub fn register(&mut self, registration: KindRegistration) {
        tracing::debug!(kind = %registration.kind, "Registered item kind");
        self.kinds.insert(registration.kind.as_str(), registration);
    }

    /// Check if a kind tag is registered
    pub fn is_registered(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// All registered kinds, sorted by tag
    pub fn registered_kinds(&self) -> Vec<&KindRegistration> {
        let mut kinds: Vec<_> = self.kinds.values().collect();
        kinds.sort_by_key(|r| r.kind);
        kinds
    }

    /// Build a playable item from a descriptor
    ///
    /// Fails with `InvalidDescriptor` when the kind is not registered, the
    /// title is blank, the duration is negative, or the kind's constructor
    /// rejects one of the extras.
    pub fn create(&mut self, descriptor: &Descriptor) -> Result<PlayableItem> {
        self.build(descriptor).map_err(|err| {
            tracing::warn!(kind = %descriptor.kind, error = %err, "Rejected descriptor");
            err
        })
    }

    /// Build one item per descriptor, stopping at the first failure
    pub fn create_all(&mut self, descriptors: &[Descriptor]) -> Result<Vec<PlayableItem>> {
        descriptors.iter().map(|d| self.create(d)).collect()
    }

    fn build(&mut self, descriptor: &Descriptor) -> Result<PlayableItem> {
        let tag = descriptor.kind.trim();
        let registration = self.kinds.get(tag).ok_or_else(|| {
            CadenceError::invalid_descriptor(
                &descriptor.title,
                format!("unknown kind `{}`", descriptor.kind),
            )
        })?;

        if descriptor.title.trim().is_empty() {
            return Err(CadenceError::invalid_descriptor(
                &descriptor.title,
                "title must not be empty",
            ));
        }

        let secs = u64::try_from(descriptor.duration).map_err(|_| {
            CadenceError::invalid_descriptor(
                &descriptor.title,
                format!("duration must not be negative (got {})", descriptor.duration),
            )
        })?;

        let kind = registration.kind;
        let details = (registration.build)(descriptor)?;

        let id = match descriptor.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ItemId::new(id),
            _ => {
                let id = ItemId::new(format!("{}-{}", kind, self.next_serial));
                self.next_serial += 1;
                id
            }
        };

        let item = PlayableItem::new(
            id,
            descriptor.title.clone(),
            Duration::from_secs(secs),
            kind,
            details,
        );
        tracing::debug!(id = %item.id(), kind = %kind, title = item.title(), "Created playable item");
        Ok(item)
    }

    fn register_builtin_kinds(&mut self) {
        self.register(KindRegistration {
            kind: ItemKind::SONG,
            display_name: "Song",
            build: Arc::new(|d: &Descriptor| {
                reject_unknown_extras(d, &["artist", "album", "format"])?;
                Ok(ItemDetails::Song {
                    artist: d.extra("artist").map(str::to_string),
                    album: d.extra("album").map(str::to_string),
                    format: parse_extra::<AudioFormat>(d, "format")?.unwrap_or_default(),
                })
            }),
        });

        self.register(KindRegistration {
            kind: ItemKind::PODCAST,
            display_name: "Podcast episode",
            build: Arc::new(|d: &Descriptor| {
                reject_unknown_extras(d, &["host", "episode"])?;
                Ok(ItemDetails::Podcast {
                    host: d.extra("host").map(str::to_string),
                    episode: parse_extra::<u32>(d, "episode")?,
                })
            }),
        });

        self.register(KindRegistration {
            kind: ItemKind::AD,
            display_name: "Advertisement",
            build: Arc::new(|d: &Descriptor| {
                reject_unknown_extras(d, &["advertiser", "skippable_after"])?;
                let skippable_after_secs = parse_extra::<u64>(d, "skippable_after")?;
                if let Some(after) = skippable_after_secs {
                    if i64::try_from(after).map_or(true, |after| after > d.duration) {
                        return Err(CadenceError::invalid_descriptor(
                            &d.title,
                            format!("skippable_after ({after}s) exceeds the ad duration"),
                        ));
                    }
                }
                Ok(ItemDetails::Ad {
                    advertiser: d.extra("advertiser").map(str::to_string),
                    skippable_after_secs,
                })
            }),
        });
    }
}

/// Parse an optional extra, rejecting values that don't parse
pub fn parse_extra<T>(descriptor: &Descriptor, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    descriptor
        .extra(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                CadenceError::invalid_descriptor(
                    &descriptor.title,
                    format!("extra `{key}` has invalid value `{raw}`: {e}"),
                )
            })
        })
        .transpose()
}

/// Fail on any extra that is not in `allowed`
pub fn reject_unknown_extras(descriptor: &Descriptor, allowed: &[&str]) -> Result<()> {
    match descriptor
        .extras
        .keys()
        .find(|key| !allowed.contains(&key.as_str()))
    {
        Some(key) => Err(CadenceError::invalid_descriptor(
            &descriptor.title,
            format!(
                "unrecognized extra `{key}` for kind `{}` (expected one of: {})",
                descriptor.kind.trim(),
                allowed.join(", ")
            ),
        )),
        None => Ok(()),
    }
}
