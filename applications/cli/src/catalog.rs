/// Built-in catalog and playlist assembly
use crate::config::CatalogEntry;
use cadence_core::{Descriptor, NodeId, Result, TrackFactory};
use cadence_playlist::Playlist;
use std::collections::HashMap;

/// Catalog used when the configuration provides none
pub fn demo_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(
            Descriptor::new("song", "Bohemian Rhapsody", 355)
                .with_extra("artist", "Queen")
                .with_extra("album", "A Night at the Opera")
                .with_extra("format", "flac"),
        ),
        CatalogEntry::new(
            Descriptor::new("song", "Imagine", 183)
                .with_extra("artist", "John Lennon")
                .with_extra("format", "flac"),
        ),
        CatalogEntry::new(
            Descriptor::new("song", "Stairway to Heaven", 482)
                .with_extra("artist", "Led Zeppelin")
                .with_extra("format", "mp3"),
        )
        .in_group("Rock Classics"),
        CatalogEntry::new(
            Descriptor::new("song", "Hotel California", 391)
                .with_extra("artist", "Eagles")
                .with_extra("format", "streaming"),
        )
        .in_group("Rock Classics"),
        CatalogEntry::new(
            Descriptor::new("song", "Sweet Child O' Mine", 356).with_extra("artist", "Guns N' Roses"),
        )
        .in_group("Rock Classics"),
        CatalogEntry::new(
            Descriptor::new("podcast", "Behind the Riff", 1260)
                .with_extra("host", "Dana Cole")
                .with_extra("episode", "12"),
        )
        .in_group("Talk"),
        CatalogEntry::new(
            Descriptor::new("ad", "Premium Trial", 30)
                .with_extra("advertiser", "Cadence")
                .with_extra("skippable_after", "5"),
        ),
    ]
}

/// Build a playlist from catalog entries
///
/// Entries without a group go directly under the root; grouped entries go
/// into one group per name, created at the position of its first entry.
pub fn build_playlist(
    factory: &mut TrackFactory,
    name: &str,
    entries: &[CatalogEntry],
) -> Result<Playlist> {
    let mut playlist = Playlist::new(name);
    let root = playlist.root();
    let mut groups: HashMap<String, NodeId> = HashMap::new();

    for entry in entries {
        let item = factory.create(&entry.descriptor)?;
        let parent = match entry.group.as_deref().map(str::trim) {
            Some(group) => match groups.get(group) {
                Some(&id) => id,
                None => {
                    let id = playlist.group(group);
                    playlist.add(root, id)?;
                    groups.insert(group.to_string(), id);
                    id
                }
            },
            None => root,
        };
        playlist.push_item(parent, item)?;
    }

    tracing::debug!(playlist = name, summary = %playlist.summary(), "Built playlist");
    Ok(playlist)
}
