// src/core/sanitize.rs

use scraper::Html;

/// Collapse whitespace runs to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Visible text of an HTML fragment, trimmed text nodes joined by a space.
/// Entities are decoded by the parser. Line breaks inside a text node
/// survive; collapsing them is left to the cleaner.
pub fn html_to_text(fragment: &str) -> String {
    if !fragment.contains('<') && !fragment.contains('&') {
        return fragment.to_string();
    }
    let doc = Html::parse_fragment(fragment);
    let parts: Vec<&str> = doc
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    parts.join(" ")
}
