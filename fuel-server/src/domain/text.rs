//! Text helpers for user-facing output.

/// Escape text for safe embedding in HTML.
///
/// Escapes `&`, `<`, `>`, `"` and `'`.
///
/// ```
/// use fuel_server::domain::escape_html;
///
/// assert_eq!(escape_html("<b>Tom & Jerry's</b>"), "&lt;b&gt;Tom &amp; Jerry&#039;s&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Use `value` unless it is missing or blank, otherwise `fallback`.
pub fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
