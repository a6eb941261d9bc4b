use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::CatalogError;
use crate::heal::heal_gaps;
use crate::ids::FolderId;
use crate::matcher::MatchStrategyKind;
use crate::merge::{
    enrich_from_rows, merge_fragments, EnrichStats, FragmentEvidence, MergeStats, TabularRow,
};
use crate::model::CatalogDocument;
use crate::ordering::sort_entries;
use crate::vocabulary::Vocabulary;

pub const DEFAULT_ID_PREFIX: &str = "basic";

/// Everything a pass needs besides its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileContext {
    pub vocabulary: Vocabulary,
    pub id_prefix: String,
    pub match_strategy: MatchStrategyKind,
    /// Display names for fields the merge has to create, by `folderId`.
    pub field_names: BTreeMap<String, String>,
    /// Name of the subject created when the document has none.
    pub subject_name: String,
}

impl Default for ReconcileContext {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            match_strategy: MatchStrategyKind::default(),
            field_names: BTreeMap::new(),
            subject_name: "物理基礎".to_string(),
        }
    }
}

impl ReconcileContext {
    pub fn field_name(&self, folder_id: &str) -> String {
        if let Some(name) = self.field_names.get(folder_id) {
            return name.clone();
        }
        match folder_id.split_once('/') {
            Some((unit, chapter)) => format!("第{}編 / 第{}章", unit, chapter),
            None => folder_id.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        self.vocabulary.validate()?;
        if self.id_prefix.trim().is_empty() {
            return Err(CatalogError::InvalidIdPrefix(self.id_prefix.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub fragments_seen: usize,
    pub rows_seen: usize,
    #[serde(flatten)]
    pub merge: MergeStats,
    #[serde(flatten)]
    pub enrich: EnrichStats,
    pub placeholders_inserted: usize,
    /// Fields whose `folderId` is not `unit/chapter`; left untouched.
    pub invalid_fields: usize,
}

/// One in-memory pass: merge fragments, sort, heal gaps, sort, attach links.
///
/// Never removes an entry or clears an enrichment. Running it again with the
/// same inputs leaves the document unchanged.
pub fn reconcile(
    doc: &mut CatalogDocument,
    fragments: &[FragmentEvidence],
    rows: &[TabularRow],
    ctx: &ReconcileContext,
) -> Result<ReconcileReport, CatalogError> {
    ctx.validate()?;
    let vocab = &ctx.vocabulary;

    let mut report = ReconcileReport {
        fragments_seen: fragments.len(),
        rows_seen: rows.len(),
        ..ReconcileReport::default()
    };

    report.merge = merge_fragments(doc, fragments, ctx);

    let mut ids: HashSet<String> = doc.entries().map(|entry| entry.id.clone()).collect();
    for subject in &mut doc.subjects {
        for field in &mut subject.fields {
            let folder = match FolderId::parse(&field.folder_id) {
                Ok(folder) => folder,
                Err(err) => {
                    warn!(error = %err, field = %field.field_name, "leaving field untouched");
                    report.invalid_fields += 1;
                    continue;
                }
            };
            sort_entries(&mut field.problems, vocab);
            report.placeholders_inserted +=
                heal_gaps(field, &folder, &ctx.id_prefix, vocab, &mut ids);
            sort_entries(&mut field.problems, vocab);
        }
    }

    // Placeholders must exist before links are attached.
    report.enrich = enrich_from_rows(doc, rows, ctx);

    info!(
        entries_created = report.merge.entries_created,
        paths_attached = report.merge.paths_attached,
        fields_created = report.merge.fields_created,
        links_attached = report.enrich.links_attached,
        placeholders_inserted = report.placeholders_inserted,
        "reconciled catalog"
    );
    Ok(report)
}
