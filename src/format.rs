use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NOT_AVAILABLE: &str = "N/A";

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Binary-scaled size with no decimals, e.g. `262144` -> `"256 KB"`.
///
/// Absent and zero sizes are both reported as `"N/A"`.
pub fn format_bytes(bytes: Option<u64>) -> String {
    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return NOT_AVAILABLE.to_string(),
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.0} {}", value, BYTE_UNITS[unit])
}

pub fn format_flags<S: AsRef<str>>(flags: &[S]) -> String {
    flags
        .iter()
        .map(|f| f.as_ref().to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_mhz(mhz: f64) -> String {
    format!("{mhz:.2} MHz")
}

/// Right-aligned whole percent, e.g. `" 37%"`.
pub fn format_percent(percent: f32) -> String {
    format!("{percent:>3.0}%")
}

pub fn or_not_available<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
