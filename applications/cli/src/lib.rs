//! Cadence CLI
//!
//! Command-line front end: loads configuration, builds a playlist from the
//! configured (or built-in) catalog and plays it with the chosen strategy.

pub mod catalog;
pub mod config;
pub mod demo;
pub mod error;
pub mod session;

pub use config::{CatalogEntry, CliConfig, PlaybackSettings};
pub use error::{CliError, Result};
