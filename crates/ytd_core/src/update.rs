use ytd_logging::{ytd_debug, ytd_info};

use crate::{Activity, AppState, Dialog, DownloadOutcome, DownloadRequest, Effect, Msg};

pub const MISSING_URL_TEXT: &str = "Please enter a video URL.";
pub const DOWNLOAD_SUCCESS_TEXT: &str = "Downloaded successfully!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::FilenameChanged(text) => {
            state.set_filename_input(text);
            Vec::new()
        }
        Msg::FormatSelected(format) => {
            state.set_format(format);
            Vec::new()
        }
        Msg::BrowseClicked => {
            if !state.is_idle() {
                return ignore_busy(state, "browse");
            }
            state.begin(Activity::ChoosingDirectory);
            vec![Effect::PickDirectory {
                current: state.output_dir().to_string(),
            }]
        }
        Msg::DirectoryChosen(choice) => {
            if state.activity() != Activity::ChoosingDirectory {
                return (state, Vec::new());
            }
            // Cancelling the chooser keeps the previous directory.
            if let Some(dir) = choice {
                state.set_output_dir(dir);
            }
            state.finish();
            Vec::new()
        }
        Msg::PreviewClicked => {
            if !state.is_idle() {
                return ignore_busy(state, "preview");
            }
            state.clear_details();
            let url = state.url().to_string();
            if url.is_empty() {
                vec![Effect::ShowDialog(Dialog::error(MISSING_URL_TEXT))]
            } else {
                ytd_info!("Preview requested for {}", url);
                state.begin(Activity::Previewing);
                vec![Effect::FetchMetadata { url }]
            }
        }
        Msg::DownloadClicked => {
            if !state.is_idle() {
                return ignore_busy(state, "download");
            }
            let url = state.url().to_string();
            if url.is_empty() {
                return (state, vec![Effect::ShowDialog(Dialog::error(MISSING_URL_TEXT))]);
            }
            let request = DownloadRequest {
                url,
                format: state.format(),
                output_dir: state.output_dir().to_string(),
                filename: state.filename(),
            };
            ytd_info!(
                "Download requested for {} as {}",
                request.url,
                request.format.label()
            );
            state.begin(Activity::Downloading);
            state.set_progress(0);
            vec![Effect::StartDownload(request)]
        }
        Msg::MetadataLoaded(details) => {
            if state.activity() != Activity::Previewing {
                return (state, Vec::new());
            }
            state.show_details(*details);
            state.finish();
            Vec::new()
        }
        Msg::PreviewFailed { reason } => {
            if state.activity() != Activity::Previewing {
                return (state, Vec::new());
            }
            state.clear_details();
            state.finish();
            failure_dialog(&state, reason)
        }
        Msg::ProgressUpdated(value) => {
            if state.activity() == Activity::Downloading {
                state.set_progress(value);
            }
            Vec::new()
        }
        Msg::DownloadFinished { outcome } => {
            if state.activity() != Activity::Downloading {
                return (state, Vec::new());
            }
            state.finish();
            match outcome {
                DownloadOutcome::Completed => {
                    vec![Effect::ShowDialog(Dialog::info(DOWNLOAD_SUCCESS_TEXT))]
                }
                DownloadOutcome::Failed { reason } => {
                    state.clear_details();
                    failure_dialog(&state, reason)
                }
            }
        }
        Msg::ErrorLogged(text) => {
            state.note_error_reported();
            vec![Effect::ShowDialog(Dialog::error(text))]
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

fn ignore_busy(state: AppState, action: &str) -> (AppState, Vec<Effect>) {
    ytd_debug!("Ignoring {} while {:?}", action, state.activity());
    (state, Vec::new())
}

/// An error the tool already logged has been shown; don't stack a second dialog.
fn failure_dialog(state: &AppState, reason: String) -> Vec<Effect> {
    if state.error_reported() {
        Vec::new()
    } else {
        vec![Effect::ShowDialog(Dialog::error(reason))]
    }
}
