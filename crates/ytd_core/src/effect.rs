use crate::DownloadFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the native directory chooser, starting at the current path.
    PickDirectory { current: String },
    FetchMetadata { url: String },
    StartDownload(DownloadRequest),
    ShowDialog(Dialog),
}

/// Everything the engine needs to build download options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub format: DownloadFormat,
    pub output_dir: String,
    /// User-supplied file name, `None` for the title-based default.
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub text: String,
}

impl Dialog {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".to_string(),
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: "Notification".to_string(),
            text: text.into(),
        }
    }
}
