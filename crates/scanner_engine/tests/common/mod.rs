//! In-memory `Fetcher` and `Prober` doubles for scanner tests.
#![allow(dead_code)]

pub mod gated_server;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use scanner_engine::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchSettings, Fetcher, HeadResponse,
    PageScanner, Prober,
};
use url::Url;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scanner_logging::initialize_for_tests);
}

pub fn url(raw: &str) -> Url {
    Url::parse(raw).unwrap()
}

/// Serves fixed HTML per URL; unknown URLs fail like an unreachable host.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, FetchOutput>,
}

impl FakeFetcher {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), page_output(url, url, html));
        self
    }

    pub fn with_redirected_page(mut self, url: &str, final_url: &str, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), page_output(url, final_url, html));
        self
    }
}

fn page_output(url: &str, final_url: &str, html: &str) -> FetchOutput {
    FetchOutput {
        bytes: html.as_bytes().to_vec(),
        metadata: FetchMetadata {
            original_url: url.to_string(),
            final_url: final_url.to_string(),
            redirect_count: usize::from(url != final_url),
            content_type: Some("text/html; charset=utf-8".to_string()),
            byte_len: html.len() as u64,
        },
    }
}

#[async_trait::async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchOutput, FetchError> {
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::new(FailureKind::Network, "connection refused"))
    }
}

/// Answers HEAD requests from a table and records every call.
#[derive(Default)]
pub struct FakeProber {
    heads: HashMap<String, HeadResponse>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl FakeProber {
    pub fn with_head(mut self, url: &str, content_type: &str, content_length: Option<u64>) -> Self {
        self.heads.insert(
            url.to_string(),
            HeadResponse {
                status: 200,
                content_length: content_length.map(|len| len.to_string()),
                content_type: Some(content_type.to_string()),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls().iter().filter(|(called, _)| called == url).count()
    }
}

#[async_trait::async_trait]
impl Prober for FakeProber {
    async fn head(&self, url: &Url, timeout: Duration) -> Result<HeadResponse, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), timeout));
        self.heads
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::new(FailureKind::Network, "connection refused"))
    }
}

pub fn scanner(fetcher: FakeFetcher, prober: Arc<FakeProber>) -> PageScanner {
    PageScanner::with_parts(Arc::new(fetcher), prober, FetchSettings::default())
}
