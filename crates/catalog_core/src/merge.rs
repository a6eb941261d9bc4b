//! Monotonic merge of harvested fragments and tabular links into a document.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ids::{synthesize_id, FolderId};
use crate::label::{parse_label, ProblemLabel};
use crate::matcher::find_entry;
use crate::model::{CatalogDocument, Field, ProblemEntry, Subject};
use crate::reconcile::ReconcileContext;
use crate::vocabulary::Vocabulary;

/// How a fragment's file name was turned into a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentNaming {
    /// `11.html`: a banded file number.
    Numbered,
    /// `001_p12_ex1.html`: an example index.
    ExampleIndex,
    /// Anything else; the stem is an opaque Question token.
    Opaque,
}

/// One fragment found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentEvidence {
    pub folder: FolderId,
    pub file_name: String,
    pub naming: FragmentNaming,
    pub label: ProblemLabel,
    /// Extracted title; empty when none could be read.
    pub title: String,
    /// Path stored as `explanationPath`, relative to the project root.
    pub path: String,
}

impl FragmentEvidence {
    pub fn file_stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }

    /// Title for an entry created from this fragment.
    pub fn entry_title(&self, vocab: &Vocabulary) -> String {
        let extracted = self.title.trim();
        if self.naming == FragmentNaming::Opaque {
            return if extracted.is_empty() {
                self.file_stem().to_string()
            } else {
                extracted.to_string()
            };
        }
        let label = self.label.display(vocab);
        if extracted.is_empty() {
            return label;
        }
        match parse_label(vocab.label_part(extracted), vocab) {
            Ok(parsed) if parsed == self.label => extracted.to_string(),
            _ => vocab.compose_title(&label, Some(extracted)),
        }
    }
}

/// One `(chapter, label, link)` row of the tabular snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    pub chapter: u32,
    /// Restricts the row to fields of this unit when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub label: String,
    #[serde(default)]
    pub link: String,
}

impl TabularRow {
    pub fn applies_to(&self, folder: &FolderId) -> bool {
        if folder.chapter_number() != Some(self.chapter) {
            return false;
        }
        match &self.unit {
            None => true,
            Some(unit) => same_segment(unit, folder.unit()),
        }
    }
}

fn same_segment(a: &str, b: &str) -> bool {
    match (a.trim().parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.trim() == b,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub entries_created: usize,
    /// Existing entries without an explanation that received the fragment path.
    pub paths_attached: usize,
    pub fields_created: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichStats {
    pub links_attached: usize,
    pub skipped_explained: usize,
    pub skipped_linked: usize,
    pub rows_without_link: usize,
    pub unmatched_rows: usize,
    pub unparseable_labels: usize,
}

/// Append one entry per fragment whose id is not yet in the document.
///
/// An existing entry with that id gets the fragment's path only when it has
/// no explanation yet; its title and any set path are kept. Fields missing for a fragment's folder are appended to the first subject.
pub fn merge_fragments(
    doc: &mut CatalogDocument,
    fragments: &[FragmentEvidence],
    ctx: &ReconcileContext,
) -> MergeStats {
    let mut stats = MergeStats::default();
    let mut ids: HashSet<String> = doc.entries().map(|entry| entry.id.clone()).collect();

    for fragment in fragments {
        let id = synthesize_id(&ctx.id_prefix, &fragment.folder, &fragment.label);
        if ids.contains(&id) {
            match doc.entry_mut(&id) {
                Some(entry) if !entry.has_explanation() => {
                    debug!(id = %id, path = %fragment.path, "attached explanation path");
                    entry.explanation_path = Some(fragment.path.clone());
                    stats.paths_attached += 1;
                }
                _ => debug!(id = %id, path = %fragment.path, "entry already present"),
            }
            continue;
        }

        let folder_id = fragment.folder.to_string();
        let (field, created) = field_for(doc, &folder_id, ctx);
        if created {
            stats.fields_created += 1;
        }

        let mut entry = ProblemEntry::new(id.clone(), fragment.entry_title(&ctx.vocabulary));
        entry.explanation_path = Some(fragment.path.clone());
        debug!(id = %id, title = %entry.title, "created entry");
        field.problems.push(entry);
        ids.insert(id);
        stats.entries_created += 1;
    }

    stats
}

fn field_for<'a>(
    doc: &'a mut CatalogDocument,
    folder_id: &str,
    ctx: &ReconcileContext,
) -> (&'a mut Field, bool) {
    let position = doc.subjects.iter().enumerate().find_map(|(s, subject)| {
        subject
            .fields
            .iter()
            .position(|field| field.folder_id == folder_id)
            .map(|f| (s, f))
    });
    if let Some((s, f)) = position {
        return (&mut doc.subjects[s].fields[f], false);
    }

    if doc.subjects.is_empty() {
        doc.subjects.push(Subject {
            subject_name: ctx.subject_name.clone(),
            folder_name: String::new(),
            fields: Vec::new(),
            extra: BTreeMap::new(),
        });
    }
    let name = ctx.field_name(folder_id);
    debug!(folder_id = %folder_id, field_name = %name, "created field");
    let fields = &mut doc.subjects[0].fields;
    fields.push(Field::new(&name, folder_id));
    let last = fields.len() - 1;
    (&mut fields[last], true)
}

/// Attach supplementary links from tabular rows.
///
/// An entry that already has an explanation, or already has a link, is left
/// untouched.
pub fn enrich_from_rows(
    doc: &mut CatalogDocument,
    rows: &[TabularRow],
    ctx: &ReconcileContext,
) -> EnrichStats {
    let mut stats = EnrichStats::default();
    let vocab = &ctx.vocabulary;
    let strategy = ctx.match_strategy.strategy();

    let mut parsed = Vec::with_capacity(rows.len());
    for row in rows {
        match parse_label(&row.label, vocab) {
            Ok(label) => parsed.push((row, label)),
            Err(err) => {
                warn!(chapter = row.chapter, error = %err, "skipping row");
                stats.unparseable_labels += 1;
            }
        }
    }

    let mut matched = vec![false; parsed.len()];
    for subject in &mut doc.subjects {
        for field in &mut subject.fields {
            let folder = match FolderId::parse(&field.folder_id) {
                Ok(folder) => folder,
                Err(err) => {
                    debug!(error = %err, "field not eligible for tabular rows");
                    continue;
                }
            };
            for (idx, (row, label)) in parsed.iter().enumerate() {
                if !row.applies_to(&folder) {
                    continue;
                }
                let Some(pos) = find_entry(&field.problems, label, vocab, strategy) else {
                    continue;
                };
                matched[idx] = true;
                let entry = &mut field.problems[pos];
                if entry.has_explanation() {
                    stats.skipped_explained += 1;
                } else if row.link.trim().is_empty() {
                    stats.rows_without_link += 1;
                } else if entry.has_link() {
                    stats.skipped_linked += 1;
                } else {
                    debug!(id = %entry.id, label = %row.label, "attached link");
                    entry.supplementary_link = Some(row.link.trim().to_string());
                    stats.links_attached += 1;
                }
            }
        }
    }

    for ((row, _), hit) in parsed.iter().zip(&matched) {
        if !hit {
            debug!(chapter = row.chapter, label = %row.label, "no entry for row");
            stats.unmatched_rows += 1;
        }
    }

    stats
}
