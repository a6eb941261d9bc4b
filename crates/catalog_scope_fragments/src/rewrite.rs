//! Turning a full markup document back into a fragment.

use std::sync::OnceLock;

use regex::Regex;

use crate::title::cached;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Inner content of the explanation container.
    Container(String),
    /// Body content with the viewer wrappers removed.
    Body(String),
    /// Input does not start with a doctype or `<html>`; left as is.
    NotADocument,
    /// A full document with neither a container nor a body.
    NoContent,
}

impl RewriteOutcome {
    pub fn fragment(&self) -> Option<&str> {
        match self {
            RewriteOutcome::Container(text) | RewriteOutcome::Body(text) => Some(text),
            RewriteOutcome::NotADocument | RewriteOutcome::NoContent => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteOutcome::Container(_) => "container",
            RewriteOutcome::Body(_) => "body",
            RewriteOutcome::NotADocument => "not_a_document",
            RewriteOutcome::NoContent => "no_content",
        }
    }
}

fn container() -> Option<&'static Regex> {
    static RE: OnceLock<Result<Regex, String>> = OnceLock::new();
    cached(
        &RE,
        r#"<div\s+class=["']explanation-area["'][^>]*>([\s\S]*?)</div>\s*</div>\s*</body>"#,
    )
}

fn body() -> Option<&'static Regex> {
    static RE: OnceLock<Result<Regex, String>> = OnceLock::new();
    cached(&RE, r"<body[^>]*>([\s\S]*?)</body>")
}

fn wrappers() -> Option<[&'static Regex; 3]> {
    static VIEWER: OnceLock<Result<Regex, String>> = OnceLock::new();
    static AREA: OnceLock<Result<Regex, String>> = OnceLock::new();
    static CLOSING: OnceLock<Result<Regex, String>> = OnceLock::new();
    Some([
        cached(&VIEWER, r#"(?m)^\s*<div\s+class=["']viewer-container["'][^>]*>\s*"#)?,
        cached(&AREA, r#"(?m)^\s*<div\s+class=["']explanation-area["'][^>]*>\s*"#)?,
        cached(&CLOSING, r"(?m)\s*</div>\s*</div>\s*$")?,
    ])
}

pub fn is_full_document(markup: &str) -> bool {
    let head = markup.trim_start();
    head.starts_with("<!DOCTYPE html>") || head.starts_with("<html")
}

/// Extract the explanation container of a full document, falling back to the
/// body with the viewer wrappers stripped.
pub fn rewrite_document(markup: &str) -> RewriteOutcome {
    if !is_full_document(markup) {
        return RewriteOutcome::NotADocument;
    }

    if let Some(inner) = container()
        .and_then(|re| re.captures(markup))
        .and_then(|caps| caps.get(1))
    {
        return RewriteOutcome::Container(inner.as_str().trim().to_string());
    }

    let Some(inner) = body()
        .and_then(|re| re.captures(markup))
        .and_then(|caps| caps.get(1))
    else {
        return RewriteOutcome::NoContent;
    };
    let Some(patterns) = wrappers() else {
        return RewriteOutcome::NoContent;
    };
    let mut text = inner.as_str().trim().to_string();
    for re in patterns {
        text = re.replace_all(&text, "").into_owned();
    }
    RewriteOutcome::Body(text.trim().to_string())
}
