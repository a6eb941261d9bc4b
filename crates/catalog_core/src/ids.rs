use std::fmt;
use std::fmt::Write as _;

use crate::band::band;
use crate::error::CatalogError;
use crate::label::{Category, Ordinal, ProblemLabel};

pub const ID_DELIMITER: char = '_';

/// Two-level `unit/chapter` key of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId {
    unit: String,
    chapter: String,
}

impl FolderId {
    pub fn new(unit: &str, chapter: &str) -> Result<Self, CatalogError> {
        let raw = format!("{}/{}", unit, chapter);
        if !valid_segment(unit) || !valid_segment(chapter) {
            return Err(CatalogError::InvalidFolderId(raw));
        }
        Ok(Self {
            unit: unit.to_string(),
            chapter: chapter.to_string(),
        })
    }

    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        match raw.split_once('/') {
            Some((unit, chapter)) => {
                Self::new(unit, chapter).map_err(|_| CatalogError::InvalidFolderId(raw.to_string()))
            }
            None => Err(CatalogError::InvalidFolderId(raw.to_string())),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    /// The chapter segment read as an integer (`"01"` is chapter 1).
    pub fn chapter_number(&self) -> Option<u32> {
        self.chapter.parse().ok()
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.unit, self.chapter)
    }
}

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.contains(ID_DELIMITER)
        && !segment.contains('/')
        && !segment.chars().any(char::is_whitespace)
}

/// `"{prefix}_{unit}_{chapter}_{suffix}"`.
pub fn synthesize_id(prefix: &str, folder: &FolderId, label: &ProblemLabel) -> String {
    format!(
        "{prefix}{d}{unit}{d}{chapter}{d}{suffix}",
        d = ID_DELIMITER,
        unit = folder.unit(),
        chapter = folder.chapter(),
        suffix = id_suffix(label),
    )
}

/// The per-folder part of an id.
///
/// In-band numbers are written as the zero-padded file number. Everything
/// else carries the category slug and a `.`, which no banded number or
/// escaped token contains.
pub fn id_suffix(label: &ProblemLabel) -> String {
    let band = band(label.category);
    match &label.ordinal {
        Ordinal::Number(n) => match band.number_for(*n) {
            Some(number) => format!("{:02}", number),
            None => format!("{}.{:02}", band.slug, n),
        },
        Ordinal::Token(token) if label.category == Category::Question => ordinal_token(token),
        Ordinal::Token(token) => format!("{}.{}", band.slug, ordinal_token(token)),
        Ordinal::Absent => format!("{}.00", band.slug),
    }
}

/// An escaped token that never reads as a number: a digit-only token has
/// its first digit escaped too.
fn ordinal_token(token: &str) -> String {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return escape_token(token);
    }
    let (first, rest) = token.split_at(1);
    let mut out = String::new();
    for c in first.chars() {
        push_escaped(&mut out, c);
    }
    out.push_str(rest);
    out
}

/// Keep ASCII alphanumerics, `_`, `-` and non-ASCII alphanumerics; write any
/// other character as `~{hex}~`.
pub fn escape_token(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    for c in token.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' || (!c.is_ascii() && c.is_alphanumeric())
        {
            out.push(c);
        } else {
            push_escaped(&mut out, c);
        }
    }
    if out.is_empty() {
        out.push('~');
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    let _ = write!(out, "~{:x}~", c as u32);
}
