use std::collections::VecDeque;

use eframe::egui;
use log::LevelFilter;
use ytd_core::{update, Activity, AppState, AppViewModel, Msg};
use ytd_logging::{ytd_debug, ytd_info, LogDestination};

use super::effects::EffectRunner;
use super::ui::constants::{BUSY_REPAINT, WINDOW_SIZE, WINDOW_TITLE};
use super::ui::render::{render, ThumbnailCache};

pub fn run_app() -> eframe::Result<()> {
    ytd_logging::initialize(LogDestination::default(), LevelFilter::Info);
    ytd_info!("Starting {}", WINDOW_TITLE);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([480.0, 420.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Box::new(YtdApp::new(EffectRunner::new()))),
    )
}

struct YtdApp {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    thumbnails: ThumbnailCache,
    inbox: VecDeque<Msg>,
}

impl YtdApp {
    fn new(runner: EffectRunner) -> Self {
        let state = AppState::new();
        let view = state.view();
        Self {
            state,
            view,
            runner,
            thumbnails: ThumbnailCache::default(),
            inbox: VecDeque::new(),
        }
    }

    /// Runs queued messages through `update`, including the ones effects answer with.
    fn process_pending_messages(&mut self) {
        while let Some(msg) = self.inbox.pop_front() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        ytd_debug!("dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;

        let replies = self.runner.run(effects);
        self.inbox.extend(replies);
    }
}

impl eframe::App for YtdApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.inbox.extend(self.runner.poll());
        self.inbox.push_back(Msg::Tick);
        self.process_pending_messages();

        let input = render(ctx, &self.view, &mut self.thumbnails);
        if !input.is_empty() {
            self.inbox.extend(input);
            self.process_pending_messages();
            ctx.request_repaint();
        }

        if self.state.activity() != Activity::Idle {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}

/// Variant name only; metadata messages carry whole thumbnails.
fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::UrlChanged(_) => "UrlChanged",
        Msg::FilenameChanged(_) => "FilenameChanged",
        Msg::FormatSelected(_) => "FormatSelected",
        Msg::BrowseClicked => "BrowseClicked",
        Msg::DirectoryChosen(_) => "DirectoryChosen",
        Msg::PreviewClicked => "PreviewClicked",
        Msg::DownloadClicked => "DownloadClicked",
        Msg::MetadataLoaded(_) => "MetadataLoaded",
        Msg::PreviewFailed { .. } => "PreviewFailed",
        Msg::ProgressUpdated(_) => "ProgressUpdated",
        Msg::DownloadFinished { .. } => "DownloadFinished",
        Msg::ErrorLogged(_) => "ErrorLogged",
        Msg::Tick => "Tick",
    }
}
