use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("could not start {program}: {message}")]
    Spawn { program: String, message: String },
    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: String },
    #[error("{program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },
    #[error("unreadable video metadata: {0}")]
    Metadata(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::Io(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThumbnailError {
    #[error("invalid thumbnail url: {0}")]
    InvalidUrl(String),
    #[error("thumbnail request failed: {0}")]
    Network(String),
    #[error("thumbnail request timed out")]
    Timeout,
    #[error("thumbnail request returned http status {0}")]
    HttpStatus(u16),
    #[error("thumbnail larger than {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
    #[error("thumbnail could not be decoded: {0}")]
    Decode(String),
}

/// Failure of one engine operation; `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Thumbnail(#[from] ThumbnailError),
    #[error("download engine unavailable: {0}")]
    Unavailable(String),
}
