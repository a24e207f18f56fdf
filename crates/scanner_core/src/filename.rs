use url::Url;

pub const UNKNOWN_FILENAME: &str = "unknown_file";

/// Query parameters that commonly carry the real name of a served file.
const NAME_PARAMS: [&str; 3] = ["filename", "file", "name"];

/// Best-effort filename for a URL. Never returns an empty string.
///
/// The last path segment wins when it has an extension. Otherwise the first
/// non-empty `filename`, `file` or `name` query parameter is used, then the
/// last non-empty path segment, then [`UNKNOWN_FILENAME`].
pub fn extract_filename(url: &Url) -> String {
    let path = url.path();
    let basename = path.rsplit('/').next().unwrap_or_default();
    if !basename.is_empty() && basename.contains('.') {
        return basename.to_string();
    }

    for param in NAME_PARAMS {
        let value = url
            .query_pairs()
            .find(|(key, value)| key == param && !value.is_empty())
            .map(|(_, value)| value.into_owned());
        if let Some(value) = value {
            return value;
        }
    }

    path.trim_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| UNKNOWN_FILENAME.to_string())
}

/// Makes a name safe to embed in a quoted `Content-Disposition` parameter.
pub fn attachment_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if matches!(c, '"' | '\\') || c.is_control() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        UNKNOWN_FILENAME.to_string()
    } else {
        cleaned
    }
}
