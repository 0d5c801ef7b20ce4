//! YT Downloader engine: download-tool adapter, event bridge and effect execution.
mod backend;
mod bridge;
mod engine;
mod error;
mod options;
mod thumbnail;
mod types;
mod ytdlp;

pub use backend::{BackendSettings, MediaBackend};
pub use bridge::{
    classify_log_line, parse_progress_line, progress_percent, strip_ansi, EventBridge, LogSink,
    ProgressSink,
};
pub use engine::{EngineHandle, EngineSettings};
pub use error::{BackendError, EngineError, ThumbnailError};
pub use options::{DownloadOptions, FormatChoice, PostProcessor, AUDIO_QUALITY, DEFAULT_FILENAME};
pub use thumbnail::{ReqwestThumbnailSource, ThumbnailSettings, ThumbnailSource};
pub use types::{EngineEvent, LogLevel, PreviewOutput, ProgressEvent, Thumbnail, VideoMetadata};
pub use ytdlp::{YtDlpBackend, PROGRESS_MARKER};
