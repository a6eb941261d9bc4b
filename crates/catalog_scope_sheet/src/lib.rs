//! Tabular import: the `(chapter, label, link)` snapshot of the link sheet.
//!
//! Accepted shapes, JSON or TOML by file extension:
//!
//! - a top-level array of rows (JSON only) or a `rows` array;
//! - each row either a `[chapter, label, link]` triple or a record with
//!   `chapter`, optional `unit`, `label` and `link` (also `url`/`youtubeUrl`).

use std::fs;
use std::path::Path;

use catalog_core::TabularRow;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("io: {0}")]
    Io(String),
    #[error("json: {0}")]
    Json(String),
    #[error("toml: {0}")]
    Toml(String),
    #[error("row {index}: {reason}")]
    Row { index: usize, reason: String },
    #[error("unsupported sheet format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetFile {
    Rows(Vec<RawRow>),
    Table { rows: Vec<RawRow> },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRow {
    Triple(Chapter, String, String),
    Record {
        chapter: Chapter,
        #[serde(default)]
        unit: Option<String>,
        label: String,
        #[serde(default, alias = "url", alias = "youtubeUrl")]
        link: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Chapter {
    Number(u32),
    Text(String),
}

impl Chapter {
    fn value(&self) -> Option<u32> {
        match self {
            Chapter::Number(n) => Some(*n),
            Chapter::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl RawRow {
    fn into_row(self, index: usize) -> Result<TabularRow, SheetError> {
        let (chapter, unit, label, link) = match self {
            RawRow::Triple(chapter, label, link) => (chapter, None, label, link),
            RawRow::Record {
                chapter,
                unit,
                label,
                link,
            } => (chapter, unit, label, link),
        };
        let chapter = chapter.value().ok_or_else(|| SheetError::Row {
            index,
            reason: "chapter is not a number".to_string(),
        })?;
        Ok(TabularRow {
            chapter,
            unit: unit.filter(|u| !u.trim().is_empty()),
            label,
            link,
        })
    }
}

/// Parse sheet text. `format` is `json` or `toml`.
pub fn parse_rows(text: &str, format: &str) -> Result<Vec<TabularRow>, SheetError> {
    let file: SheetFile = match format {
        "json" => serde_json::from_str(text).map_err(|e| SheetError::Json(e.to_string()))?,
        "toml" => toml::from_str(text).map_err(|e| SheetError::Toml(e.to_string()))?,
        other => return Err(SheetError::UnsupportedFormat(other.to_string())),
    };
    let raw = match file {
        SheetFile::Rows(rows) | SheetFile::Table { rows } => rows,
    };
    raw.into_iter()
        .enumerate()
        .map(|(index, row)| row.into_row(index))
        .collect()
}

/// Load rows from a `.json` or `.toml` file, keeping file order.
pub fn load_rows(path: &Path) -> Result<Vec<TabularRow>, SheetError> {
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let text = fs::read_to_string(path)
        .map_err(|e| SheetError::Io(format!("read {}: {}", path.display(), e)))?;
    let rows = parse_rows(&text, &format)?;
    debug!(path = %path.display(), rows = rows.len(), "loaded sheet");
    Ok(rows)
}
