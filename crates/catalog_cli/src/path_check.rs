use std::collections::HashSet;
use std::path::PathBuf;

use catalog_snapshot::load_catalog;
use serde::Serialize;

use crate::config::resolve_catalog_config;

#[derive(Debug, Clone, Default)]
pub struct CheckPathsInput {
    pub root: PathBuf,
    pub document: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckPathsOutput {
    pub document: PathBuf,
    pub checked: usize,
    /// Explanation paths whose file does not exist under the root, in
    /// document order.
    pub missing: Vec<String>,
}

/// Verify every `explanationPath` in the catalog points at an existing file.
pub fn check_explanation_paths(input: CheckPathsInput) -> Result<CheckPathsOutput, String> {
    let mut config = resolve_catalog_config(&input.root)?;
    if let Some(document) = input.document {
        config.document = document;
    }
    let document_path = config.document_path();
    if !document_path.exists() {
        return Err(format!("catalog not found: {}", document_path.display()));
    }
    let loaded = load_catalog(&document_path, &config.material_name, &config.subject_name)
        .map_err(|err| err.to_string())?;

    let mut seen = HashSet::new();
    let mut missing = Vec::new();
    for entry in loaded.document.entries() {
        let Some(path) = entry.explanation_path.as_deref().filter(|p| !p.trim().is_empty()) else {
            continue;
        };
        if !seen.insert(path.to_string()) {
            continue;
        }
        if !config.root.join(path).is_file() {
            missing.push(path.to_string());
        }
    }

    Ok(CheckPathsOutput {
        document: document_path,
        checked: seen.len(),
        missing,
    })
}
