//! Manifest derivation from an instance file on disk.

use serde_json::json;

use packsync::instance::Instance;
use packsync::manifest::Manifest;

#[tokio::test]
async fn derives_and_writes_the_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let instance_path = tmp.path().join("minecraftinstance.json");
    let manifest_path = tmp.path().join("manifest.json");

    let instance = json!({
        "name": "Test Pack",
        "customAuthor": "tester",
        "gameVersion": "1.20.1",
        "baseModLoader": { "name": "forge-47.2.0" },
        "installedAddons": [
            { "addonID": 11, "installedFile": { "id": 21, "FileNameOnDisk": "a.jar" } },
            { "addonID": 12, "installedFile": { "id": 22, "FileNameOnDisk": "b.jar" } }
        ]
    });
    std::fs::write(&instance_path, instance.to_string()).unwrap();

    let instance = Instance::load(&instance_path).await.unwrap();
    Manifest::from_instance(&instance, "0.3.1")
        .unwrap()
        .write(&manifest_path)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&manifest_path).unwrap();

    // Pretty-printed with 2-space indentation and keys in sorted order.
    assert!(written.starts_with("{\n  \"author\": \"tester\""));

    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["manifestType"], "minecraftModpack");
    assert_eq!(value["manifestVersion"], 1);
    assert_eq!(value["version"], "0.3.1");
    assert_eq!(value["minecraft"]["version"], "1.20.1");
    assert_eq!(value["minecraft"]["modLoaders"][0]["id"], "forge-47.2.0");
    assert_eq!(
        value["files"],
        json!([
            { "fileID": 21, "projectID": 11, "required": true },
            { "fileID": 22, "projectID": 12, "required": true }
        ])
    );
}
