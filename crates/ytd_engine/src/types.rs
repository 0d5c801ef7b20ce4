use serde::Deserialize;

use crate::EngineError;

/// Subset of the download tool's info JSON shown in the preview.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    /// Seconds; some extractors report fractions, live streams report nothing.
    pub duration: Option<f64>,
    pub uploader: Option<String>,
    /// `YYYYMMDD`
    pub upload_date: Option<String>,
    pub description: Option<String>,
    /// URL of the preferred thumbnail.
    pub thumbnail: Option<String>,
}

impl VideoMetadata {
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| secs as u64)
    }
}

/// RGBA8 pixels scaled to the display width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewOutput {
    pub metadata: VideoMetadata,
    pub thumbnail: Option<Thumbnail>,
}

/// Status reported by the download tool while a download runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// `percent` is the tool's formatted percentage, e.g. `" 45.0%"`.
    Downloading { percent: String },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Download progress in `0..=100`.
    Progress(u8),
    /// Error-level message from the tool, ANSI sequences removed.
    ErrorLogged(String),
    PreviewCompleted(Result<PreviewOutput, EngineError>),
    DownloadCompleted(Result<(), EngineError>),
}
