//! Scanner core: pure URL classification, naming and result types.
mod category;
mod filename;
mod record;
mod size;
mod validate;

pub use category::{classify, has_known_extension, FileCategory, EXTENSION_TABLE};
pub use filename::{attachment_filename, extract_filename, UNKNOWN_FILENAME};
pub use record::{FileRecord, ScanResult};
pub use size::{format_file_size, UNKNOWN_SIZE};
pub use validate::{validate_scan_url, ValidationError};
