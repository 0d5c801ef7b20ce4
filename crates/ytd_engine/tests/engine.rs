use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use ytd_engine::{
    BackendError, DownloadOptions, EngineError, EngineEvent, EngineHandle, FormatChoice,
    LogLevel, LogSink, MediaBackend, ProgressEvent, ProgressSink, Thumbnail, ThumbnailError,
    ThumbnailSource, VideoMetadata,
};

struct ScriptedBackend {
    thumbnail: Option<String>,
    fail_download: bool,
    seen_options: Mutex<Vec<DownloadOptions>>,
}

impl ScriptedBackend {
    fn new(thumbnail: Option<&str>, fail_download: bool) -> Self {
        Self {
            thumbnail: thumbnail.map(str::to_string),
            fail_download,
            seen_options: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl MediaBackend for ScriptedBackend {
    async fn fetch_metadata(
        &self,
        url: &str,
        log: &dyn LogSink,
    ) -> Result<VideoMetadata, BackendError> {
        if url.contains("broken") {
            log.log(LogLevel::Error, "\x1B[31mERROR: broken video\x1B[0m");
            return Err(BackendError::ExitStatus {
                program: "yt-dlp".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        log.log(LogLevel::Info, "[generic] Extracting URL");
        Ok(VideoMetadata {
            title: "Scripted".to_string(),
            duration: Some(61.0),
            uploader: None,
            upload_date: None,
            description: None,
            thumbnail: self.thumbnail.clone(),
        })
    }

    async fn download(
        &self,
        _url: &str,
        options: &DownloadOptions,
        progress: &dyn ProgressSink,
        log: &dyn LogSink,
    ) -> Result<(), BackendError> {
        self.seen_options.lock().unwrap().push(options.clone());
        progress.progress(ProgressEvent::Downloading {
            percent: " 45.0%".to_string(),
        });
        if self.fail_download {
            log.log(LogLevel::Error, "ERROR: disk full");
            return Err(BackendError::ExitStatus {
                program: "yt-dlp".to_string(),
                status: "exit status: 1".to_string(),
            });
        }
        progress.progress(ProgressEvent::Finished);
        Ok(())
    }
}

struct FixedThumbnails;

#[async_trait::async_trait]
impl ThumbnailSource for FixedThumbnails {
    async fn fetch(&self, url: &str) -> Result<Thumbnail, ThumbnailError> {
        if url.ends_with("missing.jpg") {
            return Err(ThumbnailError::HttpStatus(404));
        }
        Ok(Thumbnail {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        })
    }
}

/// Collects events until the operation's completion event arrives.
fn collect_until_done(engine: &EngineHandle) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while Instant::now() < deadline {
        match engine.try_recv() {
            Some(event) => {
                let done = matches!(
                    event,
                    EngineEvent::PreviewCompleted(_) | EngineEvent::DownloadCompleted(_)
                );
                events.push(event);
                if done {
                    return events;
                }
            }
            None => std::thread::sleep(Duration::from_millis(5)),
        }
    }
    panic!("engine did not complete in time; got {events:?}");
}

fn engine_with(backend: ScriptedBackend) -> EngineHandle {
    EngineHandle::with_parts(Arc::new(backend), Arc::new(FixedThumbnails))
}

#[test]
fn preview_returns_metadata_and_thumbnail() {
    let engine = engine_with(ScriptedBackend::new(Some("https://img.example/ok.jpg"), false));
    engine.preview("https://video.example/1");

    let events = collect_until_done(&engine);
    match events.as_slice() {
        [EngineEvent::PreviewCompleted(Ok(output))] => {
            assert_eq!(output.metadata.title, "Scripted");
            assert_eq!(output.metadata.duration_secs(), Some(61));
            assert!(output.thumbnail.is_some());
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn preview_without_thumbnail_still_succeeds() {
    let engine = engine_with(ScriptedBackend::new(None, false));
    engine.preview("https://video.example/1");

    match collect_until_done(&engine).as_slice() {
        [EngineEvent::PreviewCompleted(Ok(output))] => assert!(output.thumbnail.is_none()),
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn failing_thumbnail_fails_preview() {
    let engine = engine_with(ScriptedBackend::new(
        Some("https://img.example/missing.jpg"),
        false,
    ));
    engine.preview("https://video.example/1");

    assert_eq!(
        collect_until_done(&engine),
        vec![EngineEvent::PreviewCompleted(Err(EngineError::Thumbnail(
            ThumbnailError::HttpStatus(404)
        )))]
    );
}

#[test]
fn preview_failure_surfaces_stripped_error_first() {
    let engine = engine_with(ScriptedBackend::new(None, false));
    engine.preview("https://video.example/broken");

    let events = collect_until_done(&engine);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        EngineEvent::ErrorLogged("ERROR: broken video".to_string())
    );
    assert!(matches!(
        events[1],
        EngineEvent::PreviewCompleted(Err(EngineError::Backend(BackendError::ExitStatus { .. })))
    ));
}

#[test]
fn download_streams_progress_then_completes() {
    let backend = Arc::new(ScriptedBackend::new(None, false));
    let engine = EngineHandle::with_parts(backend.clone(), Arc::new(FixedThumbnails));
    let options = DownloadOptions::for_request(FormatChoice::AudioMp3, "/music", Some("song"));
    engine.download("https://video.example/1", options.clone());

    assert_eq!(
        collect_until_done(&engine),
        vec![
            EngineEvent::Progress(45),
            EngineEvent::Progress(100),
            EngineEvent::DownloadCompleted(Ok(())),
        ]
    );
    assert_eq!(*backend.seen_options.lock().unwrap(), vec![options]);
}

#[test]
fn failed_download_reports_error_and_failure() {
    let engine = engine_with(ScriptedBackend::new(None, true));
    let options = DownloadOptions::for_request(FormatChoice::BestVideo, "/videos", None);
    engine.download("https://video.example/1", options);

    let events = collect_until_done(&engine);
    assert_eq!(events[0], EngineEvent::Progress(45));
    assert_eq!(events[1], EngineEvent::ErrorLogged("ERROR: disk full".to_string()));
    assert!(matches!(events[2], EngineEvent::DownloadCompleted(Err(_))));
}

#[test]
fn commands_run_in_order() {
    let engine = engine_with(ScriptedBackend::new(None, false));
    engine.preview("https://video.example/1");
    engine.download(
        "https://video.example/1",
        DownloadOptions::for_request(FormatChoice::BestVideo, "/videos", None),
    );

    let first = collect_until_done(&engine);
    assert!(matches!(first.last(), Some(EngineEvent::PreviewCompleted(Ok(_)))));
    let second = collect_until_done(&engine);
    assert!(matches!(second.last(), Some(EngineEvent::DownloadCompleted(Ok(())))));
}
