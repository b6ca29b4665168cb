//! Human-readable sizes and dates

use chrono::{Local, TimeZone};

const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count with binary units: `512 B`, `1.50 KB`, `3.00 GB`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Format epoch milliseconds as a local date such as `Jan 05, 2024`.
///
/// Out-of-range timestamps render as an empty string.
#[must_use]
pub fn format_date(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_default()
}
