//! Evidence harvesting: one `FragmentEvidence` per fragment under a
//! `unit/chapter/` folder of the store.

use std::fs;
use std::path::{Component, Path};
use std::sync::OnceLock;

use catalog_core::{
    label_for_number, Category, FolderId, FragmentEvidence, FragmentNaming, Ordinal, ProblemLabel,
};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::HarvestError;
use crate::title::{cached, extract_title};
use crate::walker::{collect_fragment_paths, normalize_path};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Harvest {
    pub fragments: Vec<FragmentEvidence>,
    /// Fragments recorded with an empty title because they could not be read.
    pub unreadable: usize,
    /// Files not at `unit/chapter/file` depth or under an unusable folder name.
    pub skipped: usize,
}

/// Walk `store` (relative to `project_root` unless absolute).
///
/// A missing store harvests nothing. Paths in the evidence are relative to
/// `project_root` with forward slashes.
pub fn harvest(project_root: &Path, store: &Path) -> Result<Harvest, HarvestError> {
    let store_dir = project_root.join(store);
    let mut harvest = Harvest::default();
    if !store_dir.is_dir() {
        warn!(store = %store_dir.display(), "fragment store not found");
        return Ok(harvest);
    }

    let root_canon = project_root
        .canonicalize()
        .map_err(|e| HarvestError::io(format!("canonicalize {}", project_root.display()), e))?;
    let store_canon = store_dir
        .canonicalize()
        .map_err(|e| HarvestError::io(format!("canonicalize {}", store_dir.display()), e))?;

    let mut paths = Vec::new();
    collect_fragment_paths(&store_canon, &mut paths)?;
    paths.sort();

    for path in paths {
        let Ok(rel) = path.strip_prefix(&store_canon) else {
            continue;
        };
        let parts: Vec<&str> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect();
        let [unit, chapter, file_name] = parts.as_slice() else {
            debug!(path = %normalize_path(rel), "not at unit/chapter depth");
            harvest.skipped += 1;
            continue;
        };
        let (unit, chapter, file_name) = (*unit, *chapter, *file_name);
        let folder = match FolderId::new(unit, chapter) {
            Ok(folder) => folder,
            Err(err) => {
                warn!(path = %normalize_path(rel), error = %err, "skipping fragment");
                harvest.skipped += 1;
                continue;
            }
        };

        let title = match fs::read(&path) {
            Ok(bytes) => extract_title(&String::from_utf8_lossy(&bytes)).unwrap_or_default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable fragment");
                harvest.unreadable += 1;
                String::new()
            }
        };

        let stem = file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(file_name);
        let (naming, label) = classify_file_name(stem);
        let explanation_path = path
            .strip_prefix(&root_canon)
            .map(normalize_path)
            .unwrap_or_else(|_| normalize_path(&path));

        harvest.fragments.push(FragmentEvidence {
            folder,
            file_name: file_name.to_string(),
            naming,
            label,
            title,
            path: explanation_path,
        });
    }

    debug!(
        fragments = harvest.fragments.len(),
        skipped = harvest.skipped,
        "harvested fragment store"
    );
    Ok(harvest)
}

fn example_index() -> Option<&'static Regex> {
    static RE: OnceLock<Result<Regex, String>> = OnceLock::new();
    cached(&RE, r"ex(\d+)")
}

/// Map a fragment file stem to the label it stands for.
///
/// - `07`, `12`, `25`, `33`: banded file numbers.
/// - `001_p12_ex3`: example index; the `ex` number, else the leading index.
/// - anything else: an opaque Question named by the whole stem.
pub fn classify_file_name(stem: &str) -> (FragmentNaming, ProblemLabel) {
    if !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(label) = stem.parse().ok().and_then(label_for_number) {
            return (FragmentNaming::Numbered, label);
        }
        return (FragmentNaming::Opaque, ProblemLabel::opaque(stem));
    }

    let bytes = stem.as_bytes();
    if bytes.len() > 3 && bytes[..3].iter().all(u8::is_ascii_digit) && bytes[3] == b'_' {
        let from_ex = example_index()
            .and_then(|re| re.captures(stem))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());
        let index = from_ex
            .or_else(|| stem[..3].parse::<u32>().ok())
            .filter(|n| *n > 0);
        let ordinal = index.map(Ordinal::Number).unwrap_or(Ordinal::Absent);
        return (
            FragmentNaming::ExampleIndex,
            ProblemLabel::new(Category::Example, ordinal),
        );
    }

    (FragmentNaming::Opaque, ProblemLabel::opaque(stem))
}
