use scraper::{Html, Selector};
use url::Url;

/// Which kind of element a candidate URL was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    Anchor,
    Image,
    Video,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub url: Url,
    pub source: LinkSource,
}

/// Selector, attribute to read, and source tag, in collection order.
const LINK_SOURCES: [(&str, &str, LinkSource); 4] = [
    ("a[href]", "href", LinkSource::Anchor),
    ("img[src]", "src", LinkSource::Image),
    ("video[src], source[src]", "src", LinkSource::Video),
    ("audio[src]", "src", LinkSource::Audio),
];

/// Parsed page exposing only "elements with this attribute" queries.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Values of `attr` on every element matching `selector`, in document order.
    ///
    /// An unparsable selector matches nothing.
    pub fn attribute_values(&self, selector: &str, attr: &str) -> Vec<&str> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .filter_map(|element| element.value().attr(attr))
            .collect()
    }
}

/// Absolute candidate URLs from anchors, images, video/source and audio elements.
///
/// Anchors come first, then each media group; duplicates are kept so the caller
/// decides how to merge sources.
pub fn collect_candidates(html: &str, base: &Url) -> Vec<CandidateLink> {
    let document = PageDocument::parse(html);
    let mut links = Vec::new();

    for (selector, attr, source) in LINK_SOURCES {
        for raw in document.attribute_values(selector, attr) {
            if let Some(url) = resolve_url(raw, base) {
                links.push(CandidateLink { url, source });
            }
        }
    }

    links
}

fn resolve_url(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    if trimmed.to_ascii_lowercase().starts_with("javascript:") {
        return None;
    }
    base.join(trimmed).ok()
}
