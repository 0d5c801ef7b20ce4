//! YT Downloader core: pure state machine and view-model helpers.
mod effect;
mod format;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Dialog, DialogKind, DownloadRequest, Effect};
pub use format::{format_duration, format_upload_date};
pub use msg::{DownloadOutcome, Msg, ThumbnailImage, VideoDetails};
pub use state::{Activity, AppState, DownloadFormat};
pub use update::{update, DOWNLOAD_SUCCESS_TEXT, MISSING_URL_TEXT};
pub use view_model::{AppViewModel, MetadataView, ThumbnailView, THUMBNAIL_WIDTH};
