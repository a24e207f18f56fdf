use serde::Serialize;

use crate::FileCategory;

/// One discovered file as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub url: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub category: FileCategory,
    /// Formatted size or `"Unknown"`.
    #[serde(rename = "size")]
    pub size_display: String,
}

/// Outcome of scanning one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub success: bool,
    pub files: Vec<FileRecord>,
    pub total_files: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    pub fn completed(files: Vec<FileRecord>) -> Self {
        Self {
            success: true,
            total_files: files.len(),
            files,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            files: Vec::new(),
            total_files: 0,
            error: Some(error.into()),
        }
    }
}
