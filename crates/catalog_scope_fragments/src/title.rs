//! Best-effort title extraction from a markup fragment.

use std::sync::OnceLock;

use regex::Regex;

/// Compile `pattern` once; a pattern that fails to compile stays `None`.
pub(crate) fn cached(
    cell: &'static OnceLock<Result<Regex, String>>,
    pattern: &str,
) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).map_err(|err| err.to_string()))
        .as_ref()
        .ok()
}

fn primary_heading() -> Option<&'static Regex> {
    static RE: OnceLock<Result<Regex, String>> = OnceLock::new();
    cached(&RE, r#"(?s)<h2[^>]*class=["']prob-title-sub["'][^>]*>(.*?)</h2>"#)
}

fn fallback_heading() -> Option<&'static Regex> {
    static RE: OnceLock<Result<Regex, String>> = OnceLock::new();
    cached(&RE, r"(?s)<h3[^>]*>(.*?)</h3>")
}

fn tag() -> Option<&'static Regex> {
    static RE: OnceLock<Result<Regex, String>> = OnceLock::new();
    cached(&RE, r"<[^>]+>")
}

/// The stripped text of the first problem heading, falling back to the first
/// `<h3>`. `None` when neither is present or the heading is empty.
pub fn extract_title(markup: &str) -> Option<String> {
    let caps = primary_heading()
        .and_then(|re| re.captures(markup))
        .or_else(|| fallback_heading().and_then(|re| re.captures(markup)))?;
    let inner = caps.get(1)?.as_str();
    let text = tag()?.replace_all(inner, "");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
