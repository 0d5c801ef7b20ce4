use std::sync::Once;

use pretty_assertions::assert_eq;
use ytd_core::{
    update, Activity, AppState, Dialog, Effect, MetadataView, Msg, ThumbnailImage, VideoDetails,
    MISSING_URL_TEXT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ytd_logging::initialize_for_tests);
}

fn sample_details() -> VideoDetails {
    VideoDetails {
        title: "Big Buck Bunny".to_string(),
        duration_secs: Some(3661),
        uploader: Some("Blender".to_string()),
        upload_date: Some("20200115".to_string()),
        description: Some("A large rabbit.\nSecond line.".to_string()),
        thumbnail: Some(ThumbnailImage {
            width: 2,
            height: 1,
            rgba: vec![255, 0, 0, 255, 0, 255, 0, 255],
        }),
    }
}

fn start_preview(url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(AppState::new(), Msg::UrlChanged(url.to_string()));
    update(state, Msg::PreviewClicked)
}

fn loaded_state() -> AppState {
    let (state, _) = start_preview("https://video.example/watch?v=1");
    let (state, effects) = update(state, Msg::MetadataLoaded(Box::new(sample_details())));
    assert!(effects.is_empty());
    state
}

#[test]
fn preview_emits_fetch_for_trimmed_url() {
    init_logging();
    let (mut state, effects) = start_preview("  https://video.example/watch?v=1 \n");

    assert_eq!(
        effects,
        vec![Effect::FetchMetadata {
            url: "https://video.example/watch?v=1".to_string()
        }]
    );
    let view = state.view();
    assert_eq!(view.activity, Activity::Previewing);
    assert!(!view.controls_enabled);
    assert!(state.consume_dirty());
}

#[test]
fn loaded_metadata_is_formatted() {
    init_logging();
    let view = loaded_state().view();

    assert_eq!(
        view.details,
        MetadataView {
            title: "Big Buck Bunny".to_string(),
            duration: "01:01:01".to_string(),
            uploader: "Blender".to_string(),
            upload_date: "2020/01/15".to_string(),
            description: "A large rabbit.\nSecond line.".to_string(),
        }
    );
    let thumb = view.thumbnail.expect("thumbnail shown");
    assert_eq!((thumb.image.width, thumb.image.height), (2, 1));
    assert_eq!(view.activity, Activity::Idle);
    assert!(view.controls_enabled);
}

#[test]
fn missing_optional_fields_stay_blank() {
    init_logging();
    let (state, _) = start_preview("https://video.example/live");
    let (state, _) = update(
        state,
        Msg::MetadataLoaded(Box::new(VideoDetails {
            title: "Live now".to_string(),
            ..VideoDetails::default()
        })),
    );

    let view = state.view();
    assert_eq!(view.details.title, "Live now");
    assert_eq!(view.details.duration, "");
    assert_eq!(view.details.upload_date, "");
    assert!(view.thumbnail.is_none());
}

#[test]
fn failed_preview_clears_previous_result_and_reports() {
    init_logging();
    let state = loaded_state();
    let first_generation = state.view().thumbnail.unwrap().generation;

    let (state, effects) = update(state, Msg::PreviewClicked);
    assert_eq!(effects.len(), 1);
    // Fields are cleared as soon as the new request starts.
    assert!(state.view().details.is_placeholder());

    let (state, effects) = update(
        state,
        Msg::PreviewFailed {
            reason: "yt-dlp exited with status 1".to_string(),
        },
    );

    let view = state.view();
    assert!(view.details.is_placeholder());
    assert!(view.thumbnail.is_none());
    assert_eq!(view.activity, Activity::Idle);
    assert_eq!(
        effects,
        vec![Effect::ShowDialog(Dialog::error("yt-dlp exited with status 1"))]
    );

    // A later success must bump the generation so stale textures are dropped.
    let (state, _) = update(state, Msg::PreviewClicked);
    let (state, _) = update(state, Msg::MetadataLoaded(Box::new(sample_details())));
    assert!(state.view().thumbnail.unwrap().generation > first_generation);
}

#[test]
fn logged_error_suppresses_second_dialog_on_failure() {
    init_logging();
    let (state, _) = start_preview("https://video.example/private");

    let (state, effects) = update(
        state,
        Msg::ErrorLogged("ERROR: [generic] Unsupported URL".to_string()),
    );
    assert_eq!(
        effects,
        vec![Effect::ShowDialog(Dialog::error(
            "ERROR: [generic] Unsupported URL"
        ))]
    );

    let (state, effects) = update(
        state,
        Msg::PreviewFailed {
            reason: "yt-dlp exited with status 1".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().details.is_placeholder());
}

#[test]
fn empty_url_is_rejected_without_fetch() {
    init_logging();
    let (state, effects) = start_preview("   ");

    assert_eq!(
        effects,
        vec![Effect::ShowDialog(Dialog::error(MISSING_URL_TEXT))]
    );
    assert_eq!(state.view().activity, Activity::Idle);
}

#[test]
fn preview_ignored_while_busy() {
    init_logging();
    let (state, _) = start_preview("https://video.example/a");
    let (state, effects) = update(state, Msg::PreviewClicked);
    assert!(effects.is_empty());

    let (_state, effects) = update(state, Msg::DownloadClicked);
    assert!(effects.is_empty());
}

#[test]
fn stale_metadata_is_ignored_when_idle() {
    init_logging();
    let state = AppState::new();
    let before = state.view();

    let (next, effects) = update(state, Msg::MetadataLoaded(Box::new(sample_details())));

    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
}
