//! HTTP downloader with streamed writes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use log::debug;
use reqwest::Client;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::downloader::models::DownloadTask;
use crate::error::SyncError;

const USER_AGENT: &str = concat!("packsync/", env!("CARGO_PKG_VERSION"));

/// Fetches single files over HTTP(S). Response bodies are streamed to disk
/// chunk by chunk; the full payload is never held in memory.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    /// Creates a downloader with configured timeouts.
    pub fn new() -> Result<Self, SyncError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(300))
            .user_agent(USER_AGENT)
            .build()
            .map_err(SyncError::ClientBuild)?;

        Ok(Self { client })
    }

    /// Downloads `task.url` into `task.destination`.
    pub async fn download(&self, task: &DownloadTask) -> Result<(), SyncError> {
        self.fetch(&task.url, &task.destination).await
    }

    /// Retrieves one resource and writes it byte-for-byte to `destination`.
    ///
    /// The body lands in a `.part` file beside the destination and is renamed
    /// into place once the stream ends, so an interrupted transfer never
    /// leaves a truncated file under the final name.
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<(), SyncError> {
        debug!("Downloading {} to {}", url, destination.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SyncError::Transfer {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(SyncError::BadStatus {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let part = part_path(destination);
        let mut file = File::create(&part).await?;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| SyncError::Transfer {
                url: url.to_string(),
                source,
            })?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        drop(file);

        fs::rename(&part, destination).await?;
        Ok(())
    }
}

fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_appends_to_the_full_name() {
        assert_eq!(
            part_path(Path::new("/mods/jei-1.20.1.jar")),
            Path::new("/mods/jei-1.20.1.jar.part")
        );
    }
}
