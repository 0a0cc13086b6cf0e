//! Info-box markup for marker popups

/// Renders the popup body for a place. `body_html` is inserted verbatim, so
/// fetched text must go through [`escape_html`] first.
pub fn render_infobox(name: &str, body_html: &str) -> String {
    format!(
        "<div class=\"infobox\"><h4 class=\"infobox-title\">{}</h4><div class=\"infobox-content\">{}</div></div>",
        escape_html(name),
        body_html
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
