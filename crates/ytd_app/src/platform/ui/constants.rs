use std::time::Duration;

pub const WINDOW_TITLE: &str = "YT Downloader";
pub const WINDOW_SIZE: [f32; 2] = [760.0, 680.0];

/// Repaint cadence while an operation is running, so engine events are picked up.
pub const BUSY_REPAINT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetId {
    UrlInput,
    OutputDir,
    BrowseButton,
    FormatSelector,
    FilenameInput,
    PreviewButton,
    DownloadButton,
    ProgressBar,
    Thumbnail,
    Title,
    Duration,
    Uploader,
    UploadDate,
    Description,
}
