use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Full, StreamBody};
use hyper::body::Frame;
use hyper::header::{HeaderValue, CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE};
use hyper::{Method, Response, StatusCode};
use scanner_core::validate_scan_url;
use scanner_engine::{Download, Downloader, FetchError, FetchSettings, PageScanner};
use scanner_logging::{scanner_error, scanner_warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub(crate) type ResponseBody = UnsyncBoxBody<Bytes, BoxError>;

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const OCTET_STREAM: &str = "application/octet-stream";

/// Per-process collaborators shared by every request; none of them keeps request state.
pub(crate) struct AppState {
    scanner: PageScanner,
    downloader: Downloader,
}

impl AppState {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            downloader: Downloader::new(&settings)?,
            scanner: PageScanner::new(settings)?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    url: Option<String>,
}

pub(crate) async fn route(
    state: &AppState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: Bytes,
) -> Response<ResponseBody> {
    match (path, method.as_str()) {
        ("/", "GET") => with_content_type(StatusCode::OK, "text/html; charset=utf-8", INDEX_HTML),
        ("/scan", "POST") => scan(state, &body).await,
        ("/download", "GET") => download(state, query.unwrap_or_default()).await,
        ("/" | "/scan" | "/download", _) => text(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed"),
        _ => text(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Validation problems are reported in the JSON body with a 200 status.
async fn scan(state: &AppState, body: &[u8]) -> Response<ResponseBody> {
    let request: ScanRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(err) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                &json!({ "success": false, "error": format!("Invalid request body: {err}") }),
            );
        }
    };

    let url = match validate_scan_url(request.url.as_deref().unwrap_or_default()) {
        Ok(url) => url,
        Err(err) => {
            return json_response(
                StatusCode::OK,
                &json!({ "success": false, "error": err.to_string() }),
            );
        }
    };

    let result = state.scanner.scan(&url).await;
    json_response(StatusCode::OK, &result)
}

async fn download(state: &AppState, query: &str) -> Response<ResponseBody> {
    let mut url = None;
    let mut filename = None;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "url" if url.is_none() => url = Some(value.into_owned()),
            "filename" if filename.is_none() => filename = Some(value.into_owned()),
            _ => {}
        }
    }

    let Some(url) = url.filter(|url| !url.is_empty()) else {
        return text(StatusCode::BAD_REQUEST, "URL parameter is required");
    };

    match state.downloader.download(&url, filename.as_deref()).await {
        Ok(download) => attachment_response(download),
        Err(err) => {
            scanner_warn!("Download of {} failed: {}", url, err);
            text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error downloading file: {err}"),
            )
        }
    }
}

/// Relays upstream chunks as they arrive. Dropping the body (client gone)
/// drops the upstream response with it.
fn attachment_response(download: Download) -> Response<ResponseBody> {
    let disposition = HeaderValue::from_bytes(download.content_disposition().as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let content_type = HeaderValue::from_str(&download.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(OCTET_STREAM));

    let frames = download
        .body
        .map_ok(Frame::data)
        .map_err(BoxError::from);
    let mut response = Response::new(StreamBody::new(frames).boxed_unsync());
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(CONTENT_DISPOSITION, disposition);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response<ResponseBody> {
    match serde_json::to_vec(value) {
        Ok(body) => with_content_type(status, "application/json", body),
        Err(err) => {
            scanner_error!("Failed to serialize response: {}", err);
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub(crate) fn text(status: StatusCode, body: impl Into<Bytes>) -> Response<ResponseBody> {
    with_content_type(status, "text/plain; charset=utf-8", body)
}

fn with_content_type(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<ResponseBody> {
    let body: ResponseBody = Full::new(body.into())
        .map_err(|never| match never {})
        .boxed_unsync();
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
