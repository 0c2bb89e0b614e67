//! Text helpers shared by the screens

/// Truncate a string to fit within max_len characters, adding "…" if truncated
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Label on the left, value right-aligned so the line is `width` wide
pub fn name_and_value(name: &str, value: &str, width: usize) -> String {
    let used = name.chars().count();
    let pad = width.saturating_sub(used);
    format!("{name}{value:>pad$}")
}
