//! Core error types for Cadence

use crate::types::NodeId;
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type for Cadence
///
/// Every variant is reported at the operation that caused it and is never
/// recovered internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CadenceError {
    /// The track factory rejected a descriptor
    #[error("Invalid descriptor {title:?}: {reason}")]
    InvalidDescriptor { title: String, reason: String },

    /// A structural operation targeted a leaf instead of a group
    #[error("Not a composite: {0} is a leaf")]
    NotAComposite(NodeId),

    /// Linking would make a group contain itself
    #[error("Would cycle: {child} is {parent} or one of its ancestors")]
    WouldCycle { parent: NodeId, child: NodeId },

    /// Node id does not belong to this playlist
    #[error("Unknown playlist node: {0}")]
    UnknownNode(NodeId),
}

impl CadenceError {
    /// Create an invalid descriptor error
    pub fn invalid_descriptor(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            title: title.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDescriptor { .. } => "invalid_descriptor",
            Self::NotAComposite(_) => "not_a_composite",
            Self::WouldCycle { .. } => "would_cycle",
            Self::UnknownNode(_) => "unknown_node",
        }
    }
}
