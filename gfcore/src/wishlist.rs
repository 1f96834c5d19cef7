//! Markdown-lite rendering of wishlist text.
//!
//! Wishlists are free text with optional `[label](url)` links. Rendering
//! escapes HTML first, then converts links, then turns newlines into `<br>`,
//! in that order: the link label and URL in the output are already escaped.

/// Placeholder shown when a wishlist is empty or absent.
pub const EMPTY_WISHLIST: &str = "Wishlist is empty";

/// Escapes the characters that would change HTML structure.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Renders wishlist text to safe HTML: escaped, with `[label](url)` turned
/// into anchors and newlines into `<br>`.
pub fn render_wishlist(text: Option<&str>) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return EMPTY_WISHLIST.to_string(),
    };
    convert_links(&escape_html(text)).replace('\n', "<br>")
}

/// Replaces every `[label](url)` occurrence with an anchor tag. Labels and
/// URLs must be non-empty and must not contain their own closing bracket.
fn convert_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let Some((label, url, consumed)) = parse_link(&rest[open..]) else {
            out.push_str(&rest[..=open]);
            rest = &rest[open + 1..];
            continue;
        };
        out.push_str(&rest[..open]);
        out.push_str(&format!(
            "<a href=\"{url}\" target=\"_blank\" class=\"wishlist-link\">{label}</a>"
        ));
        rest = &rest[open + consumed..];
    }
    out.push_str(rest);
    out
}

/// Parses `[label](url)` at the start of `text`, returning the label, the
/// url and the byte length of the whole construct.
fn parse_link(text: &str) -> Option<(&str, &str, usize)> {
    let close = text.find(']')?;
    let label = &text[1..close];
    if label.is_empty() || !text[close + 1..].starts_with('(') {
        return None;
    }
    let url_start = close + 2;
    let url_len = text[url_start..].find(')')?;
    let url = &text[url_start..url_start + url_len];
    if url.is_empty() {
        return None;
    }
    Some((label, url, url_start + url_len + 1))
}
