use std::path::PathBuf;

use catalog_core::{reconcile, MatchStrategyKind, ReconcileReport};
use catalog_scope_fragments::harvest;
use catalog_scope_sheet::load_rows;
use catalog_snapshot::{document_sha256, load_catalog, save_catalog};
use serde::Serialize;
use tracing::info;

use crate::config::resolve_catalog_config;

#[derive(Debug, Clone, Default)]
pub struct ReconcileInput {
    pub root: PathBuf,
    pub document: Option<PathBuf>,
    pub fragments: Option<PathBuf>,
    pub sheet: Option<PathBuf>,
    pub match_strategy: Option<MatchStrategyKind>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutput {
    pub document: PathBuf,
    pub document_existed: bool,
    pub match_strategy: &'static str,
    #[serde(flatten)]
    pub report: ReconcileReport,
    pub fragments_skipped: usize,
    pub fragments_unreadable: usize,
    pub sha256_before: String,
    pub sha256_after: String,
    pub changed: bool,
    pub written: bool,
    pub dry_run: bool,
}

/// Load, harvest, reconcile and (unless dry run) write the catalog.
///
/// The document is written once, after every step succeeded.
pub fn run_reconcile(input: ReconcileInput) -> Result<ReconcileOutput, String> {
    let mut config = resolve_catalog_config(&input.root)?;
    if let Some(document) = input.document {
        config.document = document;
    }
    if let Some(fragments) = input.fragments {
        config.fragments = fragments;
    }
    if let Some(strategy) = input.match_strategy {
        config.match_strategy = strategy;
    }

    let document_path = config.document_path();
    let loaded = load_catalog(&document_path, &config.material_name, &config.subject_name)
        .map_err(|err| err.to_string())?;
    let harvested =
        harvest(&config.root, &config.fragments).map_err(|err| err.to_string())?;
    let rows = match &input.sheet {
        Some(sheet) => load_rows(&config.root.join(sheet)).map_err(|err| err.to_string())?,
        None => Vec::new(),
    };

    let mut document = loaded.document;
    let report = reconcile(&mut document, &harvested.fragments, &rows, &config.context())
        .map_err(|err| err.to_string())?;
    let sha256_after = document_sha256(&document).map_err(|err| err.to_string())?;
    let changed = sha256_after != loaded.sha256 || !loaded.existed;

    let written = !input.dry_run;
    if written {
        save_catalog(&document_path, &document).map_err(|err| err.to_string())?;
        info!(path = %document_path.display(), changed, "saved catalog");
    }

    Ok(ReconcileOutput {
        document: document_path,
        document_existed: loaded.existed,
        match_strategy: config.match_strategy.strategy().name(),
        report,
        fragments_skipped: harvested.skipped,
        fragments_unreadable: harvested.unreadable,
        sha256_before: loaded.sha256,
        sha256_after,
        changed,
        written,
        dry_run: input.dry_run,
    })
}
