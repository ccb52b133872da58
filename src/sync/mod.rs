//! Convergence of a mods directory onto an instance's mod list.

pub mod materialize;
pub mod prune;
pub mod synchronizer;

pub use materialize::{MaterializeOutcome, ModStatus};
pub use synchronizer::{SyncConfig, SyncReport, synchronize};
