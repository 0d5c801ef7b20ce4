use std::sync::Arc;

use crate::format::{format_duration, format_upload_date};
use crate::view_model::{AppViewModel, MetadataView, ThumbnailView};
use crate::{ThumbnailImage, VideoDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadFormat {
    #[default]
    Mp4,
    Mp3,
}

impl DownloadFormat {
    pub const ALL: [DownloadFormat; 2] = [DownloadFormat::Mp4, DownloadFormat::Mp3];

    pub fn extension(self) -> &'static str {
        match self {
            DownloadFormat::Mp4 => "mp4",
            DownloadFormat::Mp3 => "mp3",
        }
    }

    pub fn label(self) -> &'static str {
        self.extension()
    }
}

/// What the single in-flight operation is, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    ChoosingDirectory,
    Previewing,
    Downloading,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    output_dir: String,
    format: DownloadFormat,
    filename_input: String,
    details: MetadataView,
    thumbnail: Option<Arc<ThumbnailImage>>,
    thumbnail_generation: u64,
    progress: Option<u8>,
    activity: Activity,
    error_reported: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url_input: self.url_input.clone(),
            output_dir: self.output_dir.clone(),
            format: self.format,
            filename_input: self.filename_input.clone(),
            details: self.details.clone(),
            thumbnail: self.thumbnail.as_ref().map(|image| ThumbnailView {
                generation: self.thumbnail_generation,
                image: Arc::clone(image),
            }),
            progress: self.progress,
            activity: self.activity,
            controls_enabled: self.activity == Activity::Idle,
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.activity == Activity::Idle
    }

    pub(crate) fn url(&self) -> &str {
        self.url_input.trim()
    }

    pub(crate) fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub(crate) fn format(&self) -> DownloadFormat {
        self.format
    }

    pub(crate) fn filename(&self) -> Option<String> {
        let trimmed = self.filename_input.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_filename_input(&mut self, text: String) {
        if self.filename_input != text {
            self.filename_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_format(&mut self, format: DownloadFormat) {
        if self.format != format {
            self.format = format;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_output_dir(&mut self, dir: String) {
        self.output_dir = dir;
        self.mark_dirty();
    }

    pub(crate) fn begin(&mut self, activity: Activity) {
        self.activity = activity;
        self.error_reported = false;
        self.mark_dirty();
    }

    pub(crate) fn finish(&mut self) {
        self.activity = Activity::Idle;
        self.progress = None;
        self.mark_dirty();
    }

    /// Resets every metadata field and the thumbnail to the placeholder state.
    pub(crate) fn clear_details(&mut self) {
        self.details = MetadataView::default();
        if self.thumbnail.take().is_some() {
            self.thumbnail_generation += 1;
        }
        self.mark_dirty();
    }

    pub(crate) fn show_details(&mut self, details: VideoDetails) {
        self.details = MetadataView {
            title: details.title,
            duration: details.duration_secs.map(format_duration).unwrap_or_default(),
            uploader: details.uploader.unwrap_or_default(),
            upload_date: details
                .upload_date
                .as_deref()
                .map(format_upload_date)
                .unwrap_or_default(),
            description: details.description.unwrap_or_default(),
        };
        self.thumbnail = details.thumbnail.map(Arc::new);
        self.thumbnail_generation += 1;
        self.mark_dirty();
    }

    pub(crate) fn set_progress(&mut self, value: u8) {
        let value = value.min(100);
        if self.progress != Some(value) {
            self.progress = Some(value);
            self.mark_dirty();
        }
    }

    pub(crate) fn note_error_reported(&mut self) {
        self.error_reported = true;
    }

    pub(crate) fn error_reported(&self) -> bool {
        self.error_reported
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
