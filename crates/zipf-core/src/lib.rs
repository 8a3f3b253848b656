//! Shared building blocks for the zipf tools.
//!
//! Word-count models, the error type and its classification, severity levels,
//! the bilingual message catalog, and command-line / config-file settings.

pub mod error;
pub mod logging;
pub mod messages;
pub mod models;
pub mod settings;

pub use error::{ErrorKind, Result, ZipfError};
