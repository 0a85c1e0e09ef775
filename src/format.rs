use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

pub const NOT_AVAILABLE: &str = "n/a";

/// Truncates or pads `s` to exactly `width` display columns.
pub fn fit_column(s: &str, width: usize) -> String {
    let mut result = String::with_capacity(width);
    let mut used = 0;
    if s.width() <= width {
        result.push_str(s);
        used = s.width();
    } else {
        for ch in s.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > width {
                break;
            }
            result.push(ch);
            used += ch_width;
        }
    }
    result.extend(std::iter::repeat_n(' ', width - used));
    result
}

/// Binary units: `1023 B`, `1.0 KB`, `1.5 KB`. Negative input prints `n/a`.
pub fn human_bytes(bytes: i128) -> String {
    if bytes < 0 {
        return NOT_AVAILABLE.to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn bar(pct: f64, width: usize) -> String {
    let pct = if pct.is_nan() { 0.0 } else { pct.clamp(0.0, 100.0) };
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);

    let mut out = String::with_capacity(width + 2);
    out.push('[');
    out.extend(std::iter::repeat_n('#', filled));
    out.extend(std::iter::repeat_n(' ', width - filled));
    out.push(']');
    out
}

pub fn percent_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}
