const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const K: u64 = 1024;

/// Human-readable size suffix such as `(1.5 MB)`; empty for zero bytes.
///
/// The unit is the largest of B/KB/MB/GB the value reaches, so anything
/// past 1024 GB stays in GB. One decimal, halves rounded up.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return String::new();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < UNITS.len() && bytes / divisor >= K {
        divisor *= K;
        unit += 1;
    }

    let divisor = divisor as u128;
    let tenths = (bytes as u128 * 10 + divisor / 2) / divisor;
    format!("({}.{} {})", tenths / 10, tenths % 10, UNITS[unit])
}
