use std::sync::Once;

use pretty_assertions::assert_eq;
use ytd_core::{
    update, Activity, AppState, Dialog, DownloadFormat, DownloadOutcome, DownloadRequest, Effect,
    Msg, VideoDetails, DOWNLOAD_SUCCESS_TEXT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ytd_logging::initialize_for_tests);
}

fn apply(state: AppState, msgs: Vec<Msg>) -> (AppState, Vec<Effect>) {
    msgs.into_iter().fold((state, Vec::new()), |(state, _), msg| update(state, msg))
}

fn ready_state() -> AppState {
    let (state, _) = apply(
        AppState::new(),
        vec![
            Msg::UrlChanged("https://video.example/watch?v=7".to_string()),
            Msg::BrowseClicked,
            Msg::DirectoryChosen(Some("/tmp/videos".to_string())),
        ],
    );
    state
}

#[test]
fn download_builds_request_and_shows_progress() {
    init_logging();
    let (state, effects) = apply(
        ready_state(),
        vec![
            Msg::FormatSelected(DownloadFormat::Mp3),
            Msg::FilenameChanged("  song ".to_string()),
            Msg::DownloadClicked,
        ],
    );

    assert_eq!(
        effects,
        vec![Effect::StartDownload(DownloadRequest {
            url: "https://video.example/watch?v=7".to_string(),
            format: DownloadFormat::Mp3,
            output_dir: "/tmp/videos".to_string(),
            filename: Some("song".to_string()),
        })]
    );
    let view = state.view();
    assert_eq!(view.activity, Activity::Downloading);
    assert_eq!(view.progress, Some(0));
}

#[test]
fn blank_filename_uses_default() {
    init_logging();
    let (_state, effects) = apply(
        ready_state(),
        vec![Msg::FilenameChanged("   ".to_string()), Msg::DownloadClicked],
    );

    match effects.as_slice() {
        [Effect::StartDownload(request)] => {
            assert_eq!(request.filename, None);
            assert_eq!(request.format, DownloadFormat::Mp4);
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn progress_moves_bar_and_completion_hides_it() {
    init_logging();
    let (state, _) = update(ready_state(), Msg::DownloadClicked);

    let (state, _) = update(state, Msg::ProgressUpdated(45));
    assert_eq!(state.view().progress, Some(45));

    let (state, _) = update(state, Msg::ProgressUpdated(100));
    assert_eq!(state.view().progress, Some(100));

    let (state, effects) = update(
        state,
        Msg::DownloadFinished {
            outcome: DownloadOutcome::Completed,
        },
    );
    let view = state.view();
    assert_eq!(view.progress, None);
    assert_eq!(view.activity, Activity::Idle);
    assert_eq!(
        effects,
        vec![Effect::ShowDialog(Dialog::info(DOWNLOAD_SUCCESS_TEXT))]
    );
}

#[test]
fn failed_download_resets_fields_and_reports_error_not_success() {
    init_logging();
    let (state, _) = apply(
        ready_state(),
        vec![
            Msg::PreviewClicked,
            Msg::MetadataLoaded(Box::new(VideoDetails {
                title: "Kept until failure".to_string(),
                duration_secs: Some(10),
                ..VideoDetails::default()
            })),
            Msg::DownloadClicked,
        ],
    );
    assert_eq!(state.view().details.title, "Kept until failure");

    let (state, effects) = update(
        state,
        Msg::DownloadFinished {
            outcome: DownloadOutcome::Failed {
                reason: "yt-dlp exited with status 1".to_string(),
            },
        },
    );

    let view = state.view();
    assert!(view.details.is_placeholder());
    assert_eq!(view.progress, None);
    assert_eq!(
        effects,
        vec![Effect::ShowDialog(Dialog::error("yt-dlp exited with status 1"))]
    );
}

#[test]
fn failed_download_after_logged_error_shows_single_dialog() {
    init_logging();
    let (state, _) = update(ready_state(), Msg::DownloadClicked);
    let (state, effects) = update(state, Msg::ErrorLogged("ERROR: network down".to_string()));
    assert_eq!(effects.len(), 1);

    let (_state, effects) = update(
        state,
        Msg::DownloadFinished {
            outcome: DownloadOutcome::Failed {
                reason: "yt-dlp exited with status 1".to_string(),
            },
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn progress_outside_download_is_ignored() {
    init_logging();
    let (state, _) = update(ready_state(), Msg::ProgressUpdated(30));
    assert_eq!(state.view().progress, None);
}

#[test]
fn directory_cancel_keeps_previous_choice() {
    init_logging();
    let (state, effects) = update(ready_state(), Msg::BrowseClicked);
    assert_eq!(
        effects,
        vec![Effect::PickDirectory {
            current: "/tmp/videos".to_string()
        }]
    );
    assert_eq!(state.view().activity, Activity::ChoosingDirectory);

    let (state, _) = update(state, Msg::DirectoryChosen(None));
    let view = state.view();
    assert_eq!(view.output_dir, "/tmp/videos");
    assert_eq!(view.activity, Activity::Idle);
}

#[test]
fn directory_result_without_chooser_is_ignored() {
    init_logging();
    let (state, _) = update(
        ready_state(),
        Msg::DirectoryChosen(Some("/somewhere/else".to_string())),
    );
    assert_eq!(state.view().output_dir, "/tmp/videos");
}
