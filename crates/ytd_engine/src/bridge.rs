//! Turns the download tool's progress and log output into engine events.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{mpsc, LazyLock};

use regex::Regex;
use ytd_logging::{ytd_debug, ytd_error, ytd_warn};

use crate::ytdlp::PROGRESS_MARKER;
use crate::{EngineEvent, LogLevel, ProgressEvent};

/// ESC followed by a CSI sequence or a single-character sequence.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("valid ANSI regex")
});

pub trait ProgressSink: Send + Sync {
    fn progress(&self, event: ProgressEvent);
}

pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Progress value in `0..=100`; `None` when the percentage is unknown.
pub fn progress_percent(event: &ProgressEvent) -> Option<u8> {
    match event {
        ProgressEvent::Finished => Some(100),
        ProgressEvent::Downloading { percent } => {
            let cleaned = strip_ansi(percent);
            let number = cleaned.trim().trim_end_matches('%').trim();
            let value: f64 = number.parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            Some(value.clamp(0.0, 100.0) as u8)
        }
    }
}

/// Parses a stdout line written by the progress template.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let idx = line.find(PROGRESS_MARKER)?;
    let rest = line[idx + PROGRESS_MARKER.len()..].trim_start();
    let (status, percent) = rest.split_once(' ').unwrap_or((rest, ""));
    match status {
        "downloading" => Some(ProgressEvent::Downloading {
            percent: percent.trim().to_string(),
        }),
        "finished" => Some(ProgressEvent::Finished),
        _ => None,
    }
}

/// Assigns a level to a stderr line of the download tool.
pub fn classify_log_line(line: &str) -> LogLevel {
    let plain = strip_ansi(line);
    let plain = plain.trim_start();
    if plain.starts_with("ERROR:") {
        LogLevel::Error
    } else if plain.starts_with("WARNING:") {
        LogLevel::Warning
    } else if plain.starts_with("[debug]") {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

const NO_PROGRESS: u16 = u16::MAX;

/// Sink pair that forwards into the engine's event channel.
///
/// Only error-level messages reach the UI; warnings go to the log file and
/// debug/info output is dropped. Repeated progress values are coalesced.
pub struct EventBridge {
    tx: mpsc::Sender<EngineEvent>,
    last_progress: AtomicU16,
}

impl EventBridge {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            tx,
            last_progress: AtomicU16::new(NO_PROGRESS),
        }
    }
}

impl ProgressSink for EventBridge {
    fn progress(&self, event: ProgressEvent) {
        let Some(value) = progress_percent(&event) else {
            return;
        };
        let previous = self.last_progress.swap(u16::from(value), Ordering::Relaxed);
        if previous != u16::from(value) {
            let _ = self.tx.send(EngineEvent::Progress(value));
        }
    }
}

impl LogSink for EventBridge {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => {
                let text = strip_ansi(message);
                ytd_error!("[yt-dlp] {}", text);
                let _ = self.tx.send(EngineEvent::ErrorLogged(text));
            }
            LogLevel::Warning => ytd_warn!("[yt-dlp] {}", strip_ansi(message)),
            LogLevel::Debug | LogLevel::Info => ytd_debug!("[yt-dlp] {}", message),
        }
    }
}
