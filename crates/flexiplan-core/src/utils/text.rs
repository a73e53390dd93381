use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate text to a display width, appending "..." when shortened
///
/// # Examples
/// ```
/// use flexiplan_core::utils::text::truncate_text;
/// assert_eq!(truncate_text("Morning run", 8), "Morni...");
/// assert_eq!(truncate_text("Run", 8), "Run");
/// ```
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    const ELLIPSIS: &str = "...";
    let ellipsis_width = ELLIPSIS.width();

    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

/// Format an ISO timestamp as `YYYY-MM-DD HH:MM`
///
/// # Examples
/// ```
/// use flexiplan_core::utils::text::format_timestamp;
/// assert_eq!(format_timestamp("2025-02-22T16:15:27.898604Z"), "2025-02-22 16:15");
/// assert_eq!(format_timestamp("yesterday"), "yesterday");
/// ```
pub fn format_timestamp(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
