use std::collections::HashSet;
use std::sync::Arc;

use scanner_core::{classify, extract_filename, FileRecord, ScanResult};
use scanner_logging::{scanner_debug, scanner_info, scanner_trace, scanner_warn};
use url::Url;

use crate::links::{collect_candidates, CandidateLink, LinkSource};
use crate::probe::{is_direct_file, probe_size};
use crate::{decode_page, FetchError, FetchSettings, Fetcher, Prober, ReqwestFetcher, ReqwestProber};

/// Fetches one page and describes the downloadable files it references.
///
/// Every probe runs sequentially; nothing is cached between scans.
pub struct PageScanner {
    fetcher: Arc<dyn Fetcher>,
    prober: Arc<dyn Prober>,
    settings: FetchSettings,
}

impl PageScanner {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let prober = ReqwestProber::new(&settings)?;
        let fetcher = ReqwestFetcher::new(settings.clone());
        Ok(Self::with_parts(Arc::new(fetcher), Arc::new(prober), settings))
    }

    pub fn with_parts(
        fetcher: Arc<dyn Fetcher>,
        prober: Arc<dyn Prober>,
        settings: FetchSettings,
    ) -> Self {
        Self {
            fetcher,
            prober,
            settings,
        }
    }

    pub async fn scan(&self, url: &Url) -> ScanResult {
        scanner_info!("Scanning {}", url);
        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                scanner_warn!("Scan of {} failed: {}", url, err);
                return ScanResult::failed(format!("Error scanning URL: {err}"));
            }
        };

        let metadata = &output.metadata;
        let base = Url::parse(&metadata.final_url).unwrap_or_else(|_| url.clone());
        let page = decode_page(&output.bytes, metadata.content_type.as_deref());
        if page.had_errors {
            scanner_debug!("Page {} had undecodable bytes ({})", base, page.encoding_label);
        }
        scanner_debug!(
            "Fetched {} bytes from {} after {} redirects",
            metadata.byte_len,
            base,
            metadata.redirect_count
        );

        // The parsed document is not Send, so it must be gone before the first probe.
        let candidates = collect_candidates(&page.html, &base);
        let candidate_count = candidates.len();
        let urls = self.select_files(candidates).await;

        let mut files = Vec::with_capacity(urls.len());
        for url in urls {
            files.push(self.build_record(&url).await);
        }

        scanner_info!(
            "Scan of {} done: {} candidates, {} files",
            base,
            candidate_count,
            files.len()
        );
        ScanResult::completed(files)
    }

    /// Merges candidates into unique URLs in first-seen order.
    ///
    /// Anchors must pass the direct-file check; media sources are taken as-is.
    async fn select_files(&self, candidates: Vec<CandidateLink>) -> Vec<Url> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut rejected_anchors: HashSet<String> = HashSet::new();
        let mut selected = Vec::new();

        for CandidateLink { url, source } in candidates {
            if seen.contains(url.as_str()) {
                continue;
            }
            if source == LinkSource::Anchor {
                if rejected_anchors.contains(url.as_str()) {
                    continue;
                }
                let timeout = self.settings.direct_probe_timeout;
                if !is_direct_file(self.prober.as_ref(), &url, timeout).await {
                    scanner_trace!("Anchor {} is not a direct file link", url);
                    rejected_anchors.insert(url.to_string());
                    continue;
                }
            }
            seen.insert(url.to_string());
            selected.push(url);
        }

        selected
    }

    /// Sizes that cannot be read (including non-HTTP schemes such as `data:`) show as "Unknown".
    async fn build_record(&self, url: &Url) -> FileRecord {
        let size_display =
            probe_size(self.prober.as_ref(), url, self.settings.size_probe_timeout).await;
        FileRecord {
            url: url.to_string(),
            filename: extract_filename(url),
            category: classify(url),
            size_display,
        }
    }
}
