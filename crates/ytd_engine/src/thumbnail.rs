use std::time::Duration;

use futures_util::StreamExt;
use image::imageops::FilterType;

use crate::{Thumbnail, ThumbnailError};

#[derive(Debug, Clone)]
pub struct ThumbnailSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Thumbnails are scaled to this width, keeping the aspect ratio.
    pub display_width: u32,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 10 * 1024 * 1024,
            display_width: 320,
        }
    }
}

#[async_trait::async_trait]
pub trait ThumbnailSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Thumbnail, ThumbnailError>;
}

/// Plain HTTP GET of the thumbnail URL, decoded and scaled for display.
#[derive(Debug, Clone, Default)]
pub struct ReqwestThumbnailSource {
    settings: ThumbnailSettings,
}

impl ReqwestThumbnailSource {
    pub fn new(settings: ThumbnailSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, ThumbnailError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ThumbnailError::Network(err.to_string()))
    }

    async fn download_bytes(&self, url: &str) -> Result<Vec<u8>, ThumbnailError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| ThumbnailError::InvalidUrl(err.to_string()))?;
        let client = self.build_client()?;
        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ThumbnailError::HttpStatus(status.as_u16()));
        }
        let max_bytes = self.settings.max_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(ThumbnailError::TooLarge { max_bytes });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(ThumbnailError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ThumbnailSource for ReqwestThumbnailSource {
    async fn fetch(&self, url: &str) -> Result<Thumbnail, ThumbnailError> {
        let bytes = self.download_bytes(url).await?;
        decode_scaled(&bytes, self.settings.display_width)
    }
}

/// Decodes image bytes and scales them to `width`, keeping the aspect ratio.
pub(crate) fn decode_scaled(bytes: &[u8], width: u32) -> Result<Thumbnail, ThumbnailError> {
    let image =
        image::load_from_memory(bytes).map_err(|err| ThumbnailError::Decode(err.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ThumbnailError::Decode("empty image".to_string()));
    }
    let width = width.max(1);
    let height = (u64::from(image.height()) * u64::from(width) / u64::from(image.width())).max(1);
    let height =
        u32::try_from(height).map_err(|_| ThumbnailError::Decode("image too tall".into()))?;
    let rgba = image
        .resize_exact(width, height, FilterType::Triangle)
        .to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ThumbnailError {
    if err.is_timeout() {
        return ThumbnailError::Timeout;
    }
    ThumbnailError::Network(err.to_string())
}
