//! Modpack instance tooling.
//!
//! Reconciles a local mods directory against the instance's installed-addon
//! list (download missing files, re-enable disabled ones, remove strays) and
//! derives the distributable `manifest.json` from the instance description.

pub mod downloader;
pub mod error;
pub mod instance;
pub mod manifest;
pub mod sync;

pub use error::SyncError;
