//! Serde models for the instance document and the mod list derived from it.

use std::collections::HashSet;
use std::path::Path;

use log::info;
use serde::Deserialize;
use tokio::fs;

use crate::error::SyncError;

/// Parsed `minecraftinstance.json`. Only the fields the tooling consumes are
/// modeled; everything else in the document is ignored.
///
/// Synchronization needs nothing but `installedAddons`, so the pack metadata
/// is optional here. The manifest projection checks for what it needs and
/// reports any absent field itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom_author: Option<String>,
    #[serde(default)]
    pub game_version: Option<String>,
    #[serde(default)]
    pub base_mod_loader: Option<BaseModLoader>,
    #[serde(default)]
    pub installed_addons: Vec<InstalledAddon>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseModLoader {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledAddon {
    #[serde(rename = "addonID")]
    pub addon_id: i64,
    pub installed_file: InstalledFile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledFile {
    pub id: i64,
    #[serde(rename = "FileNameOnDisk")]
    pub file_name_on_disk: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// One mod to converge: the on-disk name it must have and where to fetch it
/// from. Identity within a run is `file_name`.
#[derive(Debug, Clone)]
pub struct ModEntry {
    pub file_name: String,
    pub download_url: Option<String>,
}

impl Instance {
    /// Reads and parses an instance file.
    pub async fn load(path: &Path) -> Result<Self, SyncError> {
        let json = fs::read_to_string(path)
            .await
            .map_err(|source| SyncError::InstanceRead {
                path: path.to_path_buf(),
                source,
            })?;
        info!("Found {} file", path.display());

        serde_json::from_str(&json).map_err(|source| SyncError::InstanceParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Derives the run's mod list. Rejects duplicate file names: workers
    /// write to disjoint destination paths and rely on it.
    pub fn mod_entries(&self) -> Result<Vec<ModEntry>, SyncError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(self.installed_addons.len());

        for addon in &self.installed_addons {
            let file = &addon.installed_file;
            if !seen.insert(file.file_name_on_disk.as_str()) {
                return Err(SyncError::DuplicateFileName {
                    name: file.file_name_on_disk.clone(),
                });
            }
            entries.push(ModEntry {
                file_name: file.file_name_on_disk.clone(),
                download_url: file.download_url.clone(),
            });
        }

        Ok(entries)
    }
}
