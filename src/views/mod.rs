//! Server-rendered HTML. Every interpolated value goes through `escape`.

pub mod errors;
pub mod things;

use crate::extractors::Notice;

/// Escape text for HTML element content and double-quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap a page body in the application layout.
pub fn layout(title: &str, notice: Option<Notice>, body: &str) -> String {
    let notice_html = notice
        .map(|n| format!("<p id=\"notice\">{}</p>\n", escape(n.message())))
        .unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}{}</body>\n</html>\n",
        escape(title),
        notice_html,
        body
    )
}
