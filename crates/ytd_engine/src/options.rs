use std::path::Path;

use crate::ytdlp::PROGRESS_TEMPLATE;

/// Target bitrate (kbit/s) for extracted audio.
pub const AUDIO_QUALITY: &str = "192";

/// Output name used when the user leaves the file name empty.
pub const DEFAULT_FILENAME: &str = "%(title)s.%(ext)s";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    BestVideo,
    AudioMp3,
}

impl FormatChoice {
    pub fn extension(self) -> &'static str {
        match self {
            FormatChoice::BestVideo => "mp4",
            FormatChoice::AudioMp3 => "mp3",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    AudioExtraction { codec: String, quality: String },
}

/// Options for one download, translated to tool arguments by [`DownloadOptions::to_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Format selector, e.g. `best` or `bestaudio/best`.
    pub format: String,
    /// Output path template; literal `%` is escaped as `%%`.
    pub output_template: String,
    pub post_processors: Vec<PostProcessor>,
}

impl DownloadOptions {
    pub fn for_request(choice: FormatChoice, output_dir: &str, filename: Option<&str>) -> Self {
        let (format, post_processors) = match choice {
            FormatChoice::AudioMp3 => (
                "bestaudio/best",
                vec![PostProcessor::AudioExtraction {
                    codec: "mp3".to_string(),
                    quality: AUDIO_QUALITY.to_string(),
                }],
            ),
            FormatChoice::BestVideo => ("best", Vec::new()),
        };

        Self {
            format: format.to_string(),
            output_template: output_template(output_dir, filename, choice.extension()),
            post_processors,
        }
    }

    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.clone(),
        ];
        for pp in &self.post_processors {
            match pp {
                PostProcessor::AudioExtraction { codec, quality } => {
                    args.extend([
                        "-x".to_string(),
                        "--audio-format".to_string(),
                        codec.clone(),
                        "--audio-quality".to_string(),
                        format!("{quality}K"),
                    ]);
                }
            }
        }
        args.extend([
            "--no-playlist".to_string(),
            "--newline".to_string(),
            "--no-color".to_string(),
            "--progress-template".to_string(),
            PROGRESS_TEMPLATE.to_string(),
        ]);
        args
    }
}

fn output_template(output_dir: &str, filename: Option<&str>, extension: &str) -> String {
    let dir = match output_dir.trim() {
        "" => ".",
        dir => dir,
    };
    let name = match filename.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => escape_template(&with_extension(name, extension)),
        None => DEFAULT_FILENAME.to_string(),
    };
    let dir = escape_template(dir);
    Path::new(&dir).join(name).to_string_lossy().into_owned()
}

fn with_extension(name: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let already = name.len() > suffix.len()
        && name
            .get(name.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(&suffix));
    if already {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

fn escape_template(text: &str) -> String {
    text.replace('%', "%%")
}
