use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use ytd_logging::{ytd_debug, ytd_info};

use crate::bridge::{classify_log_line, parse_progress_line};
use crate::{
    BackendError, BackendSettings, DownloadOptions, LogSink, MediaBackend, ProgressEvent,
    ProgressSink, VideoMetadata,
};

/// Prefix of every stdout line produced by [`PROGRESS_TEMPLATE`].
pub const PROGRESS_MARKER: &str = "[ytd-progress]";

pub(crate) const PROGRESS_TEMPLATE: &str =
    "download:[ytd-progress] %(progress.status)s %(progress._percent_str)s";

/// Drives the `yt-dlp` executable as a subprocess.
#[derive(Debug, Clone, Default)]
pub struct YtDlpBackend {
    settings: BackendSettings,
}

impl YtDlpBackend {
    pub fn new(settings: BackendSettings) -> Self {
        Self { settings }
    }

    fn program_name(&self) -> String {
        self.settings.program.display().to_string()
    }

    /// Runs the tool to completion, handing each stdout line to `on_stdout`
    /// and each stderr line to `log`.
    async fn run(
        &self,
        args: Vec<String>,
        timeout: Option<Duration>,
        on_stdout: &mut (dyn FnMut(&str) + Send),
        log: &dyn LogSink,
    ) -> Result<(), BackendError> {
        let program = self.program_name();
        ytd_debug!("Running {} {}", program, args.join(" "));

        let mut child = Command::new(&self.settings.program)
            .args(&self.settings.launcher_args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| BackendError::Spawn {
                program: program.clone(),
                message: err.to_string(),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BackendError::Io("stdout unavailable".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| BackendError::Io("stderr unavailable".to_string()))?;

        let pump = async {
            let mut out_lines = BufReader::new(stdout).lines();
            let mut err_lines = BufReader::new(stderr).lines();
            let mut out_open = true;
            let mut err_open = true;
            while out_open || err_open {
                tokio::select! {
                    line = out_lines.next_line(), if out_open => match line? {
                        Some(line) => on_stdout(&line),
                        None => out_open = false,
                    },
                    line = err_lines.next_line(), if err_open => match line? {
                        Some(line) => log.log(classify_log_line(&line), &line),
                        None => err_open = false,
                    },
                }
            }
            child.wait().await
        };

        let status = with_timeout(pump, timeout)
            .await
            .map_err(|elapsed| BackendError::Timeout {
                program: program.clone(),
                secs: elapsed.as_secs(),
            })??;

        if status.success() {
            Ok(())
        } else {
            Err(BackendError::ExitStatus {
                program,
                status: status.to_string(),
            })
        }
    }
}

/// Applies `limit` if present; the error carries the limit that ran out.
async fn with_timeout<F: Future>(fut: F, limit: Option<Duration>) -> Result<F::Output, Duration> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| limit),
        None => Ok(fut.await),
    }
}

#[async_trait::async_trait]
impl MediaBackend for YtDlpBackend {
    async fn fetch_metadata(
        &self,
        url: &str,
        log: &dyn LogSink,
    ) -> Result<VideoMetadata, BackendError> {
        let args = vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--no-playlist".to_string(),
            "--no-color".to_string(),
            "--".to_string(),
            url.to_string(),
        ];
        let mut json = String::new();
        let mut collect = |line: &str| {
            json.push_str(line);
            json.push('\n');
        };
        self.run(args, Some(self.settings.metadata_timeout), &mut collect, log)
            .await?;

        let metadata: VideoMetadata = serde_json::from_str(json.trim())
            .map_err(|err| BackendError::Metadata(err.to_string()))?;
        ytd_info!("Fetched metadata for {:?}", metadata.title);
        Ok(metadata)
    }

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        progress: &dyn ProgressSink,
        log: &dyn LogSink,
    ) -> Result<(), BackendError> {
        let mut args = options.to_args();
        args.push("--".to_string());
        args.push(url.to_string());

        let mut on_stdout = |line: &str| match parse_progress_line(line) {
            Some(event) => progress.progress(event),
            None => ytd_debug!("[yt-dlp] {}", line),
        };
        self.run(args, self.settings.download_timeout, &mut on_stdout, log)
            .await?;

        progress.progress(ProgressEvent::Finished);
        ytd_info!("Download finished into {}", options.output_template);
        Ok(())
    }
}
