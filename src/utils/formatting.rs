//! Formatting utilities used by the kiosk screens.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn dim(s: &str) -> String {
    format!("\x1b[2m{}\x1b[0m", s)
}

/// Pad to a display width, so names with accents or wide glyphs still line up.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Center within a display width.
pub fn center(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    let left = (width - w) / 2;
    format!("{}{}", " ".repeat(left), s)
}

/// Worked seconds as "07h 30m".
pub fn hours2readable(seconds: i64) -> String {
    let mins = seconds.max(0) / 60;
    format!("{:02}h {:02}m", mins / 60, mins % 60)
}

/// Worked seconds as decimal hours, "7.50".
pub fn hours_decimal(seconds: i64) -> String {
    format!("{:.2}", seconds as f64 / 3600.0)
}
