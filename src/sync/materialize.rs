//! Per-mod materialization: decide whether a listed mod needs a download, a
//! rename, or nothing, and fan the decisions out over a bounded worker pool.

use std::path::{Path, PathBuf};

use futures_util::{StreamExt, stream};
use log::info;
use tokio::fs;

use crate::downloader::{DownloadTask, HttpDownloader};
use crate::error::SyncError;
use crate::instance::ModEntry;

/// Suffix marking a mod that is present but intentionally inactive.
pub const DISABLED_SUFFIX: &str = ".disabled";

/// How a listed mod currently exists on disk, resolved once per mod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModStatus {
    Active,
    Disabled,
    Missing,
}

impl ModStatus {
    /// Probes the filesystem for `active`, the path the mod must end up at.
    pub async fn resolve(active: &Path) -> Self {
        if path_exists(active).await {
            Self::Active
        } else if path_exists(&disabled_variant(active)).await {
            Self::Disabled
        } else {
            Self::Missing
        }
    }
}

/// An unreadable path counts as absent, like `Path::exists`.
async fn path_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// What materializing one mod actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeOutcome {
    AlreadyPresent,
    Reactivated,
    Downloaded,
}

/// Brings one mod into its active on-disk state.
///
/// An existing active file always wins over a disabled variant, and a
/// disabled variant always wins over a fresh download, so a mod the user
/// disabled and re-listed is renamed back instead of re-fetched.
pub async fn materialize(
    downloader: &HttpDownloader,
    entry: &ModEntry,
    mods_dir: &Path,
) -> Result<MaterializeOutcome, SyncError> {
    let destination = mods_dir.join(&entry.file_name);

    match ModStatus::resolve(&destination).await {
        ModStatus::Active => Ok(MaterializeOutcome::AlreadyPresent),
        ModStatus::Disabled => {
            fs::rename(disabled_variant(&destination), &destination).await?;
            info!("Re-enabled {}", entry.file_name);
            Ok(MaterializeOutcome::Reactivated)
        }
        ModStatus::Missing => {
            let url = entry
                .download_url
                .as_deref()
                .ok_or_else(|| SyncError::MissingDownloadUrl {
                    name: entry.file_name.clone(),
                })?;
            info!("Mod {} not found, downloading it", entry.file_name);
            downloader
                .download(&DownloadTask {
                    url: url.to_string(),
                    destination,
                })
                .await?;
            Ok(MaterializeOutcome::Downloaded)
        }
    }
}

/// Drains the mod list through at most `workers` concurrent materializations.
///
/// Every entry yields exactly one result; a failing mod never prevents the
/// others from being attempted. Completion order is unspecified.
pub async fn materialize_all(
    downloader: &HttpDownloader,
    entries: &[ModEntry],
    mods_dir: &Path,
    workers: usize,
) -> Vec<(String, Result<MaterializeOutcome, SyncError>)> {
    let tasks = entries.iter().map(|entry| async move {
        let result = materialize(downloader, entry, mods_dir).await;
        (entry.file_name.clone(), result)
    });

    stream::iter(tasks)
        .buffer_unordered(workers.max(1))
        .collect()
        .await
}

fn disabled_variant(active: &Path) -> PathBuf {
    let mut name = active.as_os_str().to_os_string();
    name.push(DISABLED_SUFFIX);
    PathBuf::from(name)
}
