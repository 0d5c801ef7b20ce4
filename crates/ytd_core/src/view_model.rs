use std::sync::Arc;

use crate::{Activity, DownloadFormat, ThumbnailImage};

/// Display width of the preview thumbnail, in pixels.
pub const THUMBNAIL_WIDTH: u32 = 320;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub output_dir: String,
    pub format: DownloadFormat,
    pub filename_input: String,
    pub details: MetadataView,
    pub thumbnail: Option<ThumbnailView>,
    /// `Some` while the progress bar is visible.
    pub progress: Option<u8>,
    pub activity: Activity,
    pub controls_enabled: bool,
    pub dirty: bool,
}

/// Formatted metadata strings; all empty is the placeholder state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataView {
    pub title: String,
    pub duration: String,
    pub uploader: String,
    pub upload_date: String,
    pub description: String,
}

impl MetadataView {
    pub fn is_placeholder(&self) -> bool {
        self == &MetadataView::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailView {
    /// Bumped whenever the thumbnail changes, so renderers can cache textures.
    pub generation: u64,
    pub image: Arc<ThumbnailImage>,
}
