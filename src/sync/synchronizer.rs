//! Run orchestration: ensure the directory, load the list, download, prune.

use std::path::PathBuf;

use log::{info, warn};
use tokio::fs;

use crate::downloader::HttpDownloader;
use crate::error::SyncError;
use crate::instance::Instance;
use crate::sync::materialize::{MaterializeOutcome, materialize_all};
use crate::sync::prune::prune;

/// Worker count for the download phase.
pub const DEFAULT_WORKERS: usize = 16;

/// Everything a run needs, passed in explicitly. The synchronizer never
/// consults the process working directory.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub instance_path: PathBuf,
    pub mods_dir: PathBuf,
    pub workers: usize,
}

impl SyncConfig {
    pub fn new(instance_path: impl Into<PathBuf>, mods_dir: impl Into<PathBuf>) -> Self {
        Self {
            instance_path: instance_path.into(),
            mods_dir: mods_dir.into(),
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Summary of one run. Per-mod failures are collected here rather than
/// aborting the batch.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub downloaded: usize,
    pub reactivated: usize,
    pub already_present: usize,
    pub failed: Vec<(String, SyncError)>,
    pub pruned: usize,
    pub prune_failures: usize,
}

impl SyncReport {
    /// True when every listed mod materialized and every stray was removed.
    pub fn is_converged(&self) -> bool {
        self.failed.is_empty() && self.prune_failures == 0
    }
}

/// Converges the mods directory onto the instance's mod list.
///
/// Phases run in a fixed order: ensure the directory exists, load the list,
/// materialize every mod (bounded concurrency, all tasks joined), then prune.
/// Pruning after the download phase is load-bearing: it must see the
/// post-reactivation file set, or a listed-but-disabled mod would be deleted
/// instead of renamed.
pub async fn synchronize(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    if config.mods_dir.exists() {
        if !config.mods_dir.is_dir() {
            return Err(SyncError::NotADirectory {
                path: config.mods_dir.clone(),
            });
        }
    } else {
        info!("{} does not exist, creating it", config.mods_dir.display());
        fs::create_dir_all(&config.mods_dir).await?;
    }

    let instance = Instance::load(&config.instance_path).await?;
    let entries = instance.mod_entries()?;
    info!("Instance loaded, has {} mods", entries.len());

    let downloader = HttpDownloader::new()?;

    info!("Download any missing mod");
    let results = materialize_all(&downloader, &entries, &config.mods_dir, config.workers).await;

    let mut report = SyncReport::default();
    for (file_name, result) in results {
        match result {
            Ok(MaterializeOutcome::Downloaded) => report.downloaded += 1,
            Ok(MaterializeOutcome::Reactivated) => report.reactivated += 1,
            Ok(MaterializeOutcome::AlreadyPresent) => report.already_present += 1,
            Err(err) => {
                warn!("Failed to materialize {file_name}: {err}");
                report.failed.push((file_name, err));
            }
        }
    }

    info!("Delete any removed mods");
    let pruned = prune(&entries, &config.mods_dir).await?;
    report.pruned = pruned.removed;
    report.prune_failures = pruned.failed;

    Ok(report)
}
