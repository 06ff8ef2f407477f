//! Cadence - Playlist Composite
//!
//! A playlist is a tree whose leaves wrap single playable items and whose
//! groups hold an ordered list of further nodes. Both kinds answer the same
//! questions (`flatten`, `total_duration`), so callers never need to know
//! whether they hold one track or a whole mix.
//!
//! Nodes live in an arena owned by [`Playlist`] and are addressed by
//! [`NodeId`](cadence_core::NodeId). Structural misuse is reported through
//! [`CadenceError`](cadence_core::CadenceError):
//! - `NotAComposite` when a leaf is used where a group is required
//! - `WouldCycle` when a group would end up inside itself

#![forbid(unsafe_code)]

mod tree;

pub use cadence_core::{NodeId, Result};
pub use tree::{Playlist, PlaylistNode, PlaylistSummary};
