//! Arena-backed playlist tree
//!
//! Leaves and groups share one interface: both flatten to an ordered list of
//! items and both report a total duration.

use cadence_core::{CadenceError, NodeId, PlayableItem, Result};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Stored node kind
#[derive(Debug, Clone)]
enum NodeKind {
    Leaf(PlayableItem),
    Group { name: String, children: Vec<NodeId> },
}

/// Arena slot
#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    /// Owning group; kept only for cycle checks and re-parenting
    parent: Option<NodeId>,
}

/// Borrowed view of a playlist node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaylistNode<'a> {
    /// Wraps exactly one playable item
    Leaf(&'a PlayableItem),

    /// Ordered children, possibly empty
    Group { name: &'a str, children: &'a [NodeId] },
}

impl PlaylistNode<'_> {
    pub fn is_group(&self) -> bool {
        matches!(self, PlaylistNode::Group { .. })
    }
}

/// Playlist composite
///
/// Nodes are created detached and linked into groups with [`Playlist::add`].
/// A group owns its children: adding a node that already belongs to another
/// group moves it. The tree can never contain a cycle.
///
/// ```text
/// root "Road Trip"
/// ├── leaf  A (120s)
/// └── group "Chill"
///     ├── leaf  B (60s)
///     └── leaf  C (90s)
/// ```
///
/// # Example
///
/// ```rust
/// use cadence_core::{Descriptor, TrackFactory};
/// use cadence_playlist::Playlist;
/// use std::time::Duration;
///
/// let mut factory = TrackFactory::with_builtin_kinds();
/// let mut playlist = Playlist::new("Road Trip");
///
/// let a = factory.create(&Descriptor::new("song", "A", 120)).unwrap();
/// playlist.push_item(playlist.root(), a).unwrap();
///
/// let chill = playlist.group("Chill");
/// playlist.add(playlist.root(), chill).unwrap();
/// for (title, secs) in [("B", 60), ("C", 90)] {
///     let item = factory.create(&Descriptor::new("song", title, secs)).unwrap();
///     playlist.push_item(chill, item).unwrap();
/// }
///
/// let titles: Vec<_> = playlist.flatten().iter().map(|i| i.title().to_string()).collect();
/// assert_eq!(titles, ["A", "B", "C"]);
/// assert_eq!(playlist.total_duration(), Duration::from_secs(270));
/// ```
#[derive(Debug, Clone)]
pub struct Playlist {
    nodes: Vec<Slot>,
    root: NodeId,
}

impl Playlist {
    /// Create a playlist whose root group carries `name`
    pub fn new(name: impl Into<String>) -> Self {
        let root = Slot {
            kind: NodeKind::Group {
                name: name.into(),
                children: Vec::new(),
            },
            parent: None,
        };
        Self {
            nodes: vec![root],
            root: NodeId::from_index(0),
        }
    }

    /// Create a playlist holding `items` directly under the root
    pub fn from_items(name: impl Into<String>, items: impl IntoIterator<Item = PlayableItem>) -> Self {
        let mut playlist = Self::new(name);
        for item in items {
            let leaf = playlist.leaf(item);
            playlist.link(playlist.root, leaf);
        }
        playlist
    }

    /// Root group
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Name of the root group
    pub fn name(&self) -> &str {
        match &self.nodes[self.root.index()].kind {
            NodeKind::Group { name, .. } => name,
            NodeKind::Leaf(item) => item.title(),
        }
    }

    /// Create a detached leaf
    pub fn leaf(&mut self, item: PlayableItem) -> NodeId {
        self.insert(NodeKind::Leaf(item))
    }

    /// Create a detached, empty group
    pub fn group(&mut self, name: impl Into<String>) -> NodeId {
        self.insert(NodeKind::Group {
            name: name.into(),
            children: Vec::new(),
        })
    }

    /// Create a leaf for `item` and append it to `parent`
    pub fn push_item(&mut self, parent: NodeId, item: PlayableItem) -> Result<NodeId> {
        self.expect_group(parent)?;
        let leaf = self.leaf(item);
        self.link(parent, leaf);
        Ok(leaf)
    }

    /// Append `child` to the children of `parent`
    ///
    /// Fails with `NotAComposite` when `parent` is a leaf and with
    /// `WouldCycle` when `child` is `parent`, one of its ancestors, or the
    /// playlist root (the root never gets a parent). A child that already
    /// belongs to a group is detached from it first.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.slot(child)?;
        self.expect_group(parent)?;

        if child == self.root || self.ancestors(parent).any(|ancestor| ancestor == child) {
            tracing::warn!(%parent, %child, "Rejected link that would create a cycle");
            return Err(CadenceError::WouldCycle { parent, child });
        }

        if let Some(previous) = self.nodes[child.index()].parent {
            self.unlink(previous, child);
        }
        self.link(parent, child);
        tracing::debug!(%parent, %child, "Linked playlist node");
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// Returns whether `child` was one of `parent`'s children. The detached
    /// node stays valid and can be added again.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.slot(child)?;
        self.expect_group(parent)?;

        if self.nodes[child.index()].parent != Some(parent) {
            return Ok(false);
        }
        self.unlink(parent, child);
        tracing::debug!(%parent, %child, "Detached playlist node");
        Ok(true)
    }

    /// Borrow a node
    pub fn node(&self, id: NodeId) -> Result<PlaylistNode<'_>> {
        Ok(match &self.slot(id)?.kind {
            NodeKind::Leaf(item) => PlaylistNode::Leaf(item),
            NodeKind::Group { name, children } => PlaylistNode::Group { name, children },
        })
    }

    /// Children of a group in insertion order
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        match &self.slot(id)?.kind {
            NodeKind::Group { children, .. } => Ok(children),
            NodeKind::Leaf(_) => Err(CadenceError::NotAComposite(id)),
        }
    }

    /// Items reachable from the root, in order
    pub fn flatten(&self) -> Vec<PlayableItem> {
        let mut items = Vec::new();
        self.collect_items(self.root, &mut items);
        items
    }

    /// Items reachable from `id`, in order
    pub fn flatten_node(&self, id: NodeId) -> Result<Vec<PlayableItem>> {
        self.slot(id)?;
        let mut items = Vec::new();
        self.collect_items(id, &mut items);
        Ok(items)
    }

    /// Sum of the durations of every item under the root
    pub fn total_duration(&self) -> Duration {
        self.duration_of(self.root)
    }

    /// Duration of a leaf's item, or the sum over a group's children
    pub fn total_duration_node(&self, id: NodeId) -> Result<Duration> {
        self.slot(id)?;
        Ok(self.duration_of(id))
    }

    /// Number of items reachable from the root
    pub fn len(&self) -> usize {
        self.count(self.root).0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One-line overview of the playlist
    pub fn summary(&self) -> PlaylistSummary {
        let (items, groups) = self.count(self.root);
        PlaylistSummary {
            name: self.name().to_string(),
            items,
            // the root itself is not counted
            groups: groups - 1,
            total_duration_secs: self.total_duration().as_secs(),
        }
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Slot { kind, parent: None });
        id
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.nodes
            .get(id.index())
            .ok_or(CadenceError::UnknownNode(id))
    }

    fn expect_group(&self, id: NodeId) -> Result<()> {
        match self.slot(id)?.kind {
            NodeKind::Group { .. } => Ok(()),
            NodeKind::Leaf(_) => Err(CadenceError::NotAComposite(id)),
        }
    }

    /// `id` followed by each of its ancestors up to a detached node
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), |current| self.nodes[current.index()].parent)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Group { children, .. } = &mut self.nodes[parent.index()].kind {
            children.push(child);
        }
        self.nodes[child.index()].parent = Some(parent);
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) {
        if let NodeKind::Group { children, .. } = &mut self.nodes[parent.index()].kind {
            children.retain(|c| *c != child);
        }
        self.nodes[child.index()].parent = None;
    }

    fn collect_items(&self, id: NodeId, out: &mut Vec<PlayableItem>) {
        match &self.nodes[id.index()].kind {
            NodeKind::Leaf(item) => out.push(item.clone()),
            NodeKind::Group { children, .. } => {
                for child in children {
                    self.collect_items(*child, out);
                }
            }
        }
    }

    fn duration_of(&self, id: NodeId) -> Duration {
        match &self.nodes[id.index()].kind {
            NodeKind::Leaf(item) => item.duration(),
            NodeKind::Group { children, .. } => {
                // saturates rather than overflowing on huge item durations
                children
                    .iter()
                    .fold(Duration::ZERO, |total, child| {
                        total.saturating_add(self.duration_of(*child))
                    })
            }
        }
    }

    /// (leaves, groups) reachable from `id`, `id` included
    fn count(&self, id: NodeId) -> (usize, usize) {
        match &self.nodes[id.index()].kind {
            NodeKind::Leaf(_) => (1, 0),
            NodeKind::Group { children, .. } => children
                .iter()
                .map(|child| self.count(*child))
                .fold((0, 1), |(leaves, groups), (l, g)| (leaves + l, groups + g)),
        }
    }
}

/// Overview line for a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub items: usize,
    /// Nested groups below the root
    pub groups: usize,
    pub total_duration_secs: u64,
}

impl fmt::Display for PlaylistSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Playlist: {} | Items: {} | Groups: {} | Duration: {}s",
            self.name, self.items, self.groups, self.total_duration_secs
        )
    }
}
