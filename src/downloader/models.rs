use std::path::PathBuf;

/// One pending transfer: where a mod comes from and where it lands. Lives
/// only for the download phase of a run.
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub destination: PathBuf,
}
