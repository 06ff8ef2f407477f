//! Cadence Core
//!
//! Item types, error handling and the track factory shared by every Cadence
//! crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `PlayableItem`, `Descriptor`, `ItemKind`, `ItemDetails`
//! - **Track Factory**: `TrackFactory`, a registry mapping kind tags to
//!   constructors and the only place a `PlayableItem` is built
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Descriptor, TrackFactory};
//! use std::time::Duration;
//!
//! let mut factory = TrackFactory::with_builtin_kinds();
//!
//! let song = factory
//!     .create(&Descriptor::new("song", "Hotel California", 391).with_extra("artist", "Eagles"))
//!     .unwrap();
//! assert_eq!(song.duration(), Duration::from_secs(391));
//!
//! // Unknown kinds are rejected
//! assert!(factory.create(&Descriptor::new("jingle", "Intro", 5)).is_err());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod factory;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use factory::{BuildFn, KindRegistration, TrackFactory};
pub use types::{AudioFormat, Descriptor, ItemDetails, ItemId, ItemKind, NodeId, PlayableItem};
