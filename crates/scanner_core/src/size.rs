pub const UNKNOWN_SIZE: &str = "Unknown";

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Human-readable byte count: whole bytes below 1 KB, one decimal above.
pub fn format_file_size(size_bytes: u64) -> String {
    if size_bytes < KIB {
        format!("{size_bytes} B")
    } else if size_bytes < MIB {
        format!("{:.1} KB", size_bytes as f64 / KIB as f64)
    } else if size_bytes < GIB {
        format!("{:.1} MB", size_bytes as f64 / MIB as f64)
    } else {
        format!("{:.1} GB", size_bytes as f64 / GIB as f64)
    }
}
