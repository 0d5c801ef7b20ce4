use crate::DownloadFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlChanged(String),
    /// User edited the optional file name box.
    FilenameChanged(String),
    /// User picked an entry in the format selector.
    FormatSelected(DownloadFormat),
    /// User clicked the browse button next to the output directory.
    BrowseClicked,
    /// Directory chooser closed; `None` when the user cancelled.
    DirectoryChosen(Option<String>),
    /// User clicked the preview (confirm) button.
    PreviewClicked,
    /// User clicked Download.
    DownloadClicked,
    /// Engine finished a preview successfully.
    MetadataLoaded(Box<VideoDetails>),
    /// Engine preview failed.
    PreviewFailed { reason: String },
    /// Engine download progress, already in `0..=100`.
    ProgressUpdated(u8),
    /// Engine download completion.
    DownloadFinished { outcome: DownloadOutcome },
    /// The download tool logged an error (ANSI sequences already removed).
    ErrorLogged(String),
    /// UI/render tick to coalesce rendering.
    Tick,
}

/// Raw metadata of one video, as delivered by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoDetails {
    pub title: String,
    pub duration_secs: Option<u64>,
    pub uploader: Option<String>,
    /// `YYYYMMDD`
    pub upload_date: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<ThumbnailImage>,
}

/// Decoded RGBA8 thumbnail, already scaled for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed,
    Failed { reason: String },
}
