//! Removal of files the mod list no longer claims.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};
use tokio::fs;

use crate::error::SyncError;
use crate::instance::ModEntry;

/// What the prune phase did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub removed: usize,
    pub failed: usize,
}

/// Deletes every regular file in `mods_dir` whose name is not in the mod
/// list. Directories are never touched. A file that fails to delete is
/// reported and counted; it does not stop the rest of the prune.
///
/// Runs strictly after the download phase: a `.disabled` file whose base name
/// is listed has already been renamed to its active name by then, so anything
/// still carrying the suffix here is a stray.
pub async fn prune(entries: &[ModEntry], mods_dir: &Path) -> Result<PruneOutcome, SyncError> {
    let expected: HashSet<&str> = entries.iter().map(|entry| entry.file_name.as_str()).collect();

    let mut outcome = PruneOutcome::default();
    let mut dir = fs::read_dir(mods_dir).await?;

    while let Some(dirent) = dir.next_entry().await? {
        let file_type = match dirent.file_type().await {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!("Failed to inspect {}: {err}", dirent.path().display());
                outcome.failed += 1;
                continue;
            }
        };
        if file_type.is_dir() {
            continue;
        }

        // A name that is not valid UTF-8 cannot match any list entry.
        let name = dirent.file_name();
        if name.to_str().is_some_and(|name| expected.contains(name)) {
            continue;
        }

        let path = dirent.path();
        info!("Found removed mod {}, deleting it", path.display());
        match fs::remove_file(&path).await {
            Ok(()) => outcome.removed += 1,
            Err(err) => {
                warn!("Failed to delete {}: {err}", path.display());
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}
