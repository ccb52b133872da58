//! Error types shared across the sync and manifest paths.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong during a run.
///
/// Configuration and source errors abort a run before any mod is touched.
/// Transfer errors are scoped to a single mod and collected into the run
/// report; filesystem errors during pruning are scoped to a single file.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The mods path exists but is something other than a directory.
    #[error("{} exists but is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// The instance file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    InstanceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The instance file is not valid JSON or misses required fields.
    #[error("failed to parse {}: {source}", .path.display())]
    InstanceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two addons claim the same on-disk file name. Workers materialize mods
    /// without locking, which is only sound while destination paths are
    /// disjoint.
    #[error("instance lists {name} more than once")]
    DuplicateFileName { name: String },

    /// An addon has no download URL and its file is not present locally.
    #[error("mod {name} has no download URL and is not present locally")]
    MissingDownloadUrl { name: String },

    /// The instance lacks pack metadata the manifest projection needs. The
    /// sync path never reads these fields.
    #[error("instance file has no {field} field, required for the manifest")]
    MissingManifestField { field: &'static str },

    #[error("failed to encode manifest")]
    ManifestEncode(#[source] serde_json::Error),

    #[error("failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    /// The request itself failed: connection error, timeout, interrupted body.
    #[error("request to {url} failed")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("GET {url} returned HTTP {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error(transparent)]
    Filesystem(#[from] std::io::Error),
}
