use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use scanner_core::{attachment_filename, extract_filename};
use scanner_logging::{scanner_info, scanner_warn};
use url::Url;

use crate::fetch::map_reqwest_error;
use crate::{FailureKind, FetchError, FetchSettings};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Body chunks in the order they arrive from upstream.
pub type ByteStream = BoxStream<'static, Result<Bytes, FetchError>>;

/// An upstream response ready to be relayed as an attachment.
pub struct Download {
    pub content_type: String,
    pub filename: String,
    pub body: ByteStream,
}

impl Download {
    /// `attachment; filename="<name>"` with the name made header-safe.
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename=\"{}\"",
            attachment_filename(&self.filename)
        )
    }
}

/// Streaming proxy for a single URL. Holds no state between downloads.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.download_timeout)
            .read_timeout(settings.download_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }

    /// Starts the upstream GET and returns once headers are in; the body is not read yet.
    ///
    /// An empty `filename` counts as absent and is derived from the URL.
    pub async fn download(&self, url: &str, filename: Option<&str>) -> Result<Download, FetchError> {
        let parsed = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            scanner_warn!("Download of {} rejected upstream: {}", parsed, status);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let filename = filename
            .filter(|name| !name.trim().is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| extract_filename(&parsed));
        let content_length = response.content_length();

        scanner_info!(
            "Relaying {} as {:?} ({}, {:?} bytes)",
            parsed,
            filename,
            content_type,
            content_length
        );

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_reqwest_error))
            .boxed();

        Ok(Download {
            content_type,
            filename,
            body,
        })
    }
}
