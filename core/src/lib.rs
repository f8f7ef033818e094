//! Filesystem access layer for the collection composer application.

#![deny(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod fs;
pub mod log;
pub mod types;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub use config::{FileAccessConfig, ImageDetection};
pub use error::FileAccessError;
pub use fs::FileAccessService;
pub use types::{CopyOutcome, CopyReport, DirectoryStatus};

/// Returns the version of the core crate for diagnostics.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
