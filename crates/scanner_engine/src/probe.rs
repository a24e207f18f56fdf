use std::time::Duration;

use reqwest::header::{HeaderName, CONTENT_LENGTH, CONTENT_TYPE};
use scanner_core::{format_file_size, has_known_extension, UNKNOWN_SIZE};
use scanner_logging::scanner_debug;
use url::Url;

use crate::fetch::map_reqwest_error;
use crate::{FailureKind, FetchError, FetchSettings, HeadResponse};

/// Content-type prefixes that mark a response body as a file rather than a page.
const FILE_CONTENT_TYPES: [&str; 8] = [
    "image/",
    "video/",
    "audio/",
    "application/pdf",
    "application/zip",
    "application/octet-stream",
    "application/x-",
    "text/plain",
];

/// Header-only request used to learn about a URL without downloading it.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn head(&self, url: &Url, timeout: Duration) -> Result<HeadResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .connect_timeout(settings.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn head(&self, url: &Url, timeout: Duration) -> Result<HeadResponse, FetchError> {
        let response = self
            .client
            .head(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string())
        };

        Ok(HeadResponse {
            status: response.status().as_u16(),
            content_length: header(CONTENT_LENGTH),
            content_type: header(CONTENT_TYPE),
        })
    }
}

/// Formatted size from a HEAD probe, or `"Unknown"` on any failure.
pub async fn probe_size(prober: &dyn Prober, url: &Url, timeout: Duration) -> String {
    match prober.head(url, timeout).await {
        Ok(head) => match size_from_head(&head) {
            Some(bytes) => format_file_size(bytes),
            None => {
                scanner_debug!(
                    "No usable size for {} (status {}, content-length {:?})",
                    url,
                    head.status,
                    head.content_length
                );
                UNKNOWN_SIZE.to_string()
            }
        },
        Err(err) => {
            scanner_debug!("Size probe failed for {}: {}", url, err);
            UNKNOWN_SIZE.to_string()
        }
    }
}

fn size_from_head(head: &HeadResponse) -> Option<u64> {
    if head.status != 200 {
        return None;
    }
    head.content_length.as_deref()?.trim().parse().ok()
}

/// Whether `url` is itself a file: by known extension, else by probed content type.
///
/// Probe failures count as "not a file".
pub async fn is_direct_file(prober: &dyn Prober, url: &Url, timeout: Duration) -> bool {
    if has_known_extension(url) {
        return true;
    }
    match prober.head(url, timeout).await {
        Ok(head) => head
            .content_type
            .as_deref()
            .is_some_and(is_file_content_type),
        Err(err) => {
            scanner_debug!("Direct-link probe failed for {}: {}", url, err);
            false
        }
    }
}

pub fn is_file_content_type(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    FILE_CONTENT_TYPES
        .iter()
        .any(|prefix| content_type.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::{is_file_content_type, size_from_head};
    use crate::HeadResponse;

    fn head(status: u16, content_length: Option<&str>) -> HeadResponse {
        HeadResponse {
            status,
            content_length: content_length.map(str::to_string),
            content_type: None,
        }
    }

    #[test]
    fn size_requires_ok_status_and_integer_length() {
        assert_eq!(size_from_head(&head(200, Some("2048"))), Some(2048));
        assert_eq!(size_from_head(&head(200, Some(" 12 "))), Some(12));
        assert_eq!(size_from_head(&head(206, Some("2048"))), None);
        assert_eq!(size_from_head(&head(200, Some("lots"))), None);
        assert_eq!(size_from_head(&head(200, Some("-1"))), None);
        assert_eq!(size_from_head(&head(200, None)), None);
    }

    #[test]
    fn file_content_types_match_by_prefix() {
        assert!(is_file_content_type("image/png"));
        assert!(is_file_content_type("Application/PDF"));
        assert!(is_file_content_type("application/x-tar"));
        assert!(is_file_content_type("text/plain; charset=utf-8"));
        assert!(!is_file_content_type("text/html; charset=utf-8"));
        assert!(!is_file_content_type("application/json"));
        assert!(!is_file_content_type(""));
    }
}
