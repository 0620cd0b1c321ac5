//! Formatting helpers shared by the terminal reports

/// Format a percentage with precision that shrinks as the value grows
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar scaled against `max_value`
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Center a title within `width` columns
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_len` characters, ending in an ellipsis when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
