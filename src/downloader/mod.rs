//! Streamed HTTP retrieval of mod files.

pub mod http;
pub mod models;

pub use http::HttpDownloader;
pub use models::DownloadTask;
