use std::fmt;

use serde::Serialize;
use url::Url;

/// Kind of downloadable file, decided from the URL path suffix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Images,
    Videos,
    Audio,
    Documents,
    Archives,
    Executables,
    Others,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Images => "images",
            FileCategory::Videos => "videos",
            FileCategory::Audio => "audio",
            FileCategory::Documents => "documents",
            FileCategory::Archives => "archives",
            FileCategory::Executables => "executables",
            FileCategory::Others => "others",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognised extensions per category, checked in this order.
///
/// `Others` has no row: it is what `classify` returns when nothing matches.
pub const EXTENSION_TABLE: &[(FileCategory, &[&str])] = &[
    (
        FileCategory::Images,
        &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg", ".ico", ".tiff", ".tif",
        ],
    ),
    (
        FileCategory::Videos,
        &[
            ".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".3gp", ".ogv",
        ],
    ),
    (
        FileCategory::Audio,
        &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".wma", ".m4a"],
    ),
    (
        FileCategory::Documents,
        &[
            ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".rtf", ".odt",
        ],
    ),
    (
        FileCategory::Archives,
        &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz"],
    ),
    (
        FileCategory::Executables,
        &[".exe", ".msi", ".deb", ".rpm", ".dmg", ".pkg", ".apk"],
    ),
];

/// First category whose extension set matches the lower-cased URL path.
pub fn classify(url: &Url) -> FileCategory {
    category_for_path(url.path()).unwrap_or(FileCategory::Others)
}

/// True when the URL path ends in any extension of the table.
pub fn has_known_extension(url: &Url) -> bool {
    category_for_path(url.path()).is_some()
}

fn category_for_path(path: &str) -> Option<FileCategory> {
    let path = path.to_ascii_lowercase();
    EXTENSION_TABLE
        .iter()
        .find(|(_, extensions)| extensions.iter().any(|ext| path.ends_with(ext)))
        .map(|(category, _)| *category)
}
