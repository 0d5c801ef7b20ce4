use std::sync::{mpsc, Arc};
use std::thread;

use ytd_logging::{ytd_error, ytd_info, ytd_warn};

use crate::bridge::EventBridge;
use crate::{
    BackendSettings, DownloadOptions, EngineError, EngineEvent, MediaBackend, PreviewOutput,
    ReqwestThumbnailSource, ThumbnailSettings, ThumbnailSource, YtDlpBackend,
};

#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub backend: BackendSettings,
    pub thumbnail: ThumbnailSettings,
}

enum EngineCommand {
    Preview { url: String },
    Download { url: String, options: DownloadOptions },
}

/// Runs engine operations on a worker thread, one at a time, in request order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_parts(
            Arc::new(YtDlpBackend::new(settings.backend)),
            Arc::new(ReqwestThumbnailSource::new(settings.thumbnail)),
        )
    }

    pub fn with_parts(
        backend: Arc<dyn MediaBackend>,
        thumbnails: Arc<dyn ThumbnailSource>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    ytd_error!("Failed to start engine runtime: {}", err);
                    reject_all(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let event = runtime.block_on(handle_command(
                    backend.as_ref(),
                    thumbnails.as_ref(),
                    command,
                    &event_tx,
                ));
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn preview(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Preview { url: url.into() });
    }

    pub fn download(&self, url: impl Into<String>, options: DownloadOptions) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            url: url.into(),
            options,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn MediaBackend,
    thumbnails: &dyn ThumbnailSource,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) -> EngineEvent {
    let bridge = EventBridge::new(event_tx.clone());
    match command {
        EngineCommand::Preview { url } => {
            let result = preview(backend, thumbnails, &url, &bridge).await;
            if let Err(err) = &result {
                ytd_warn!("Preview of {} failed: {}", url, err);
            }
            EngineEvent::PreviewCompleted(result)
        }
        EngineCommand::Download { url, options } => {
            let result = backend
                .download(&url, &options, &bridge, &bridge)
                .await
                .map_err(EngineError::from);
            match &result {
                Ok(()) => ytd_info!("Download of {} completed", url),
                Err(err) => ytd_warn!("Download of {} failed: {}", url, err),
            }
            EngineEvent::DownloadCompleted(result)
        }
    }
}

/// Metadata, then the thumbnail it points at. A listed thumbnail that cannot
/// be fetched fails the whole preview.
async fn preview(
    backend: &dyn MediaBackend,
    thumbnails: &dyn ThumbnailSource,
    url: &str,
    bridge: &EventBridge,
) -> Result<PreviewOutput, EngineError> {
    let metadata = backend.fetch_metadata(url, bridge).await?;
    let thumbnail = match metadata.thumbnail.as_deref() {
        Some(thumb_url) if !thumb_url.is_empty() => Some(thumbnails.fetch(thumb_url).await?),
        _ => None,
    };
    Ok(PreviewOutput {
        metadata,
        thumbnail,
    })
}

fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: String,
) {
    while let Ok(command) = cmd_rx.recv() {
        let err = EngineError::Unavailable(reason.clone());
        let event = match command {
            EngineCommand::Preview { .. } => EngineEvent::PreviewCompleted(Err(err)),
            EngineCommand::Download { .. } => EngineEvent::DownloadCompleted(Err(err)),
        };
        if event_tx.send(event).is_err() {
            break;
        }
    }
}
