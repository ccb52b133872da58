//! Projection of an instance into the distributable modpack manifest.

use std::path::Path;

use log::info;
use serde::Serialize;
use tokio::fs;

use crate::error::SyncError;
use crate::instance::Instance;

// Fields are declared in key order so the pretty-printed file comes out with
// sorted keys, byte-compatible with manifests produced by earlier tooling.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub author: String,
    pub files: Vec<ManifestFile>,
    pub manifest_type: String,
    pub manifest_version: u32,
    pub minecraft: MinecraftSection,
    pub name: String,
    pub overrides: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestFile {
    #[serde(rename = "fileID")]
    pub file_id: i64,
    #[serde(rename = "projectID")]
    pub project_id: i64,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinecraftSection {
    pub mod_loaders: Vec<ModLoader>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModLoader {
    pub id: String,
    pub primary: bool,
}

impl Manifest {
    /// Builds the manifest for one release of the pack.
    ///
    /// The pack metadata fields are optional on [`Instance`] because the sync
    /// path does not need them; here their absence is an error.
    pub fn from_instance(instance: &Instance, version: &str) -> Result<Self, SyncError> {
        let missing = |field: &'static str| SyncError::MissingManifestField { field };
        let loader = instance
            .base_mod_loader
            .as_ref()
            .ok_or_else(|| missing("baseModLoader"))?;

        Ok(Self {
            author: instance
                .custom_author
                .clone()
                .ok_or_else(|| missing("customAuthor"))?,
            files: instance
                .installed_addons
                .iter()
                .map(|addon| ManifestFile {
                    file_id: addon.installed_file.id,
                    project_id: addon.addon_id,
                    required: true,
                })
                .collect(),
            manifest_type: "minecraftModpack".to_string(),
            manifest_version: 1,
            minecraft: MinecraftSection {
                mod_loaders: vec![ModLoader {
                    id: loader.name.clone(),
                    primary: true,
                }],
                version: instance
                    .game_version
                    .clone()
                    .ok_or_else(|| missing("gameVersion"))?,
            },
            name: instance.name.clone().ok_or_else(|| missing("name"))?,
            overrides: "overrides".to_string(),
            version: version.to_string(),
        })
    }

    /// Writes the manifest as pretty-printed JSON.
    pub async fn write(&self, path: &Path) -> Result<(), SyncError> {
        let json = serde_json::to_string_pretty(self).map_err(SyncError::ManifestEncode)?;
        fs::write(path, json).await?;
        info!("Wrote manifest to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn refuses_an_instance_without_pack_metadata() {
        let instance: Instance =
            serde_json::from_value(json!({ "installedAddons": [] })).unwrap();

        let err = Manifest::from_instance(&instance, "1.0.0").unwrap_err();

        assert!(matches!(
            err,
            SyncError::MissingManifestField { field: "baseModLoader" }
        ));
    }

    #[test]
    fn projects_instance_into_manifest_schema() {
        let instance: Instance = serde_json::from_value(json!({
            "name": "Skyfarer",
            "customAuthor": "frog",
            "gameVersion": "1.20.1",
            "baseModLoader": { "name": "forge-47.2.0" },
            "installedAddons": [
                {
                    "addonID": 238222,
                    "installedFile": {
                        "id": 4712866,
                        "FileNameOnDisk": "jei-1.20.1.jar",
                        "downloadUrl": "https://edge.example/jei-1.20.1.jar"
                    }
                }
            ]
        }))
        .unwrap();

        let manifest = Manifest::from_instance(&instance, "2.4.0").unwrap();

        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "author": "frog",
                "files": [
                    { "fileID": 4712866, "projectID": 238222, "required": true }
                ],
                "manifestType": "minecraftModpack",
                "manifestVersion": 1,
                "minecraft": {
                    "modLoaders": [
                        { "id": "forge-47.2.0", "primary": true }
                    ],
                    "version": "1.20.1"
                },
                "name": "Skyfarer",
                "overrides": "overrides",
                "version": "2.4.0"
            })
        );
    }
}
