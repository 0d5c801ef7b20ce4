use std::path::PathBuf;
use std::time::Duration;

use crate::{BackendError, DownloadOptions, LogSink, ProgressSink, VideoMetadata};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Download tool executable, looked up on `PATH` when not absolute.
    pub program: PathBuf,
    /// Arguments placed before the tool's own, e.g. `["-m", "yt_dlp"]` for a Python launcher.
    pub launcher_args: Vec<String>,
    pub metadata_timeout: Duration,
    /// `None` lets a download run for as long as it takes.
    pub download_timeout: Option<Duration>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            program: PathBuf::from(if cfg!(target_os = "windows") {
                "yt-dlp.exe"
            } else {
                "yt-dlp"
            }),
            launcher_args: Vec::new(),
            metadata_timeout: Duration::from_secs(60),
            download_timeout: None,
        }
    }
}

/// The external video-downloading tool, seen as two operations.
#[async_trait::async_trait]
pub trait MediaBackend: Send + Sync {
    /// Metadata only; nothing is written to disk.
    async fn fetch_metadata(
        &self,
        url: &str,
        log: &dyn LogSink,
    ) -> Result<VideoMetadata, BackendError>;

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        progress: &dyn ProgressSink,
        log: &dyn LogSink,
    ) -> Result<(), BackendError>;
}
