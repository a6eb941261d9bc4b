//! Filesystem traversal for explanation fragments.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HarvestError;

pub const FRAGMENT_EXTENSION: &str = "html";

/// Recursively collect fragment paths under `path`, sorted within each
/// directory so traversal order is stable across platforms.
pub fn collect_fragment_paths(path: &Path, out: &mut Vec<PathBuf>) -> Result<(), HarvestError> {
    if path.is_file() {
        if is_fragment(path) {
            out.push(path.to_path_buf());
        }
        return Ok(());
    }

    if !path.is_dir() {
        return Ok(());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(|e| HarvestError::io(path.display(), e))? {
        let entry = entry.map_err(|e| HarvestError::io("dir entry", e))?;
        entries.push(entry.path());
    }
    entries.sort();

    for entry_path in entries {
        if entry_path.is_dir() {
            let skip = entry_path
                .file_name()
                .and_then(|s| s.to_str())
                .is_some_and(should_skip_dir);
            if skip {
                continue;
            }
            collect_fragment_paths(&entry_path, out)?;
        } else if is_fragment(&entry_path) {
            out.push(entry_path);
        }
    }
    Ok(())
}

fn is_fragment(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(FRAGMENT_EXTENSION)
}

fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.') || matches!(name, "node_modules" | "target")
}

/// Normalize path separators to forward slashes.
pub fn normalize_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
