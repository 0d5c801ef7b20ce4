use std::path::Path;

use ytd_core::{
    Dialog, DialogKind, DownloadFormat, DownloadOutcome, DownloadRequest, Effect, Msg,
    ThumbnailImage, VideoDetails,
};
use ytd_engine::{
    DownloadOptions, EngineEvent, EngineHandle, EngineSettings, FormatChoice, PreviewOutput,
};
use ytd_logging::{ytd_debug, ytd_info, ytd_warn};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new() -> Self {
        Self::with_engine(EngineHandle::new(EngineSettings::default()))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Executes effects. Blocking dialogs answer immediately with messages of their own.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut msgs = Vec::new();
        for effect in effects {
            match effect {
                Effect::PickDirectory { current } => {
                    msgs.push(Msg::DirectoryChosen(pick_directory(&current)));
                }
                Effect::FetchMetadata { url } => {
                    ytd_info!("Fetching metadata url={}", url);
                    self.engine.preview(url);
                }
                Effect::StartDownload(request) => {
                    ytd_info!(
                        "Starting download url={} format={:?} dir={:?}",
                        request.url,
                        request.format,
                        request.output_dir
                    );
                    let options = download_options(&request);
                    self.engine.download(request.url, options);
                }
                Effect::ShowDialog(dialog) => show_dialog(&dialog),
            }
        }
        msgs
    }

    /// Drains engine events that arrived since the last frame.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn pick_directory(current: &str) -> Option<String> {
    let mut dialog = rfd::FileDialog::new().set_title("Choose download folder");
    if !current.is_empty() && Path::new(current).is_dir() {
        dialog = dialog.set_directory(current);
    }
    let picked = dialog.pick_folder().map(|path| path.display().to_string());
    ytd_debug!("Directory chooser returned {:?}", picked);
    picked
}

fn show_dialog(dialog: &Dialog) {
    let level = match dialog.kind {
        DialogKind::Error => rfd::MessageLevel::Error,
        DialogKind::Info => rfd::MessageLevel::Info,
    };
    let _ = rfd::MessageDialog::new()
        .set_level(level)
        .set_title(dialog.title.as_str())
        .set_description(dialog.text.as_str())
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn map_format(format: DownloadFormat) -> FormatChoice {
    match format {
        DownloadFormat::Mp4 => FormatChoice::BestVideo,
        DownloadFormat::Mp3 => FormatChoice::AudioMp3,
    }
}

fn download_options(request: &DownloadRequest) -> DownloadOptions {
    DownloadOptions::for_request(
        map_format(request.format),
        &request.output_dir,
        request.filename.as_deref(),
    )
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress(percent) => Msg::ProgressUpdated(percent),
        EngineEvent::ErrorLogged(line) => Msg::ErrorLogged(line),
        EngineEvent::PreviewCompleted(Ok(output)) => Msg::MetadataLoaded(Box::new(details(output))),
        EngineEvent::PreviewCompleted(Err(err)) => Msg::PreviewFailed {
            reason: err.to_string(),
        },
        EngineEvent::DownloadCompleted(Ok(())) => Msg::DownloadFinished {
            outcome: DownloadOutcome::Completed,
        },
        EngineEvent::DownloadCompleted(Err(err)) => {
            ytd_warn!("Download reported failure: {}", err);
            Msg::DownloadFinished {
                outcome: DownloadOutcome::Failed {
                    reason: err.to_string(),
                },
            }
        }
    }
}

fn details(output: PreviewOutput) -> VideoDetails {
    let duration_secs = output.metadata.duration_secs();
    let metadata = output.metadata;
    VideoDetails {
        title: metadata.title,
        duration_secs,
        uploader: metadata.uploader,
        upload_date: metadata.upload_date,
        description: metadata.description,
        thumbnail: output.thumbnail.map(|thumb| ThumbnailImage {
            width: thumb.width,
            height: thumb.height,
            rgba: thumb.rgba,
        }),
    }
}
