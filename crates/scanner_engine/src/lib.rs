//! Scanner engine: page fetching, header probes, link collection and streaming downloads.
mod decode;
mod download;
mod fetch;
mod links;
mod probe;
mod scan;
mod types;

pub use decode::{decode_page, DecodedPage};
pub use download::{ByteStream, Download, Downloader};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use links::{collect_candidates, CandidateLink, LinkSource, PageDocument};
pub use probe::{is_direct_file, is_file_content_type, probe_size, Prober, ReqwestProber};
pub use scan::PageScanner;
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, HeadResponse};
