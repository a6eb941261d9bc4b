use std::collections::HashSet;

use tracing::debug;

use crate::ids::{synthesize_id, FolderId};
use crate::label::{Category, Ordinal, ProblemLabel};
use crate::model::{Field, ProblemEntry};
use crate::vocabulary::Vocabulary;

/// Insert an Example placeholder before every Related entry that lacks one.
///
/// Works on a snapshot of the field's labels and rebuilds the entry list, so
/// nothing is inserted into the sequence being scanned. A placeholder is only
/// created when the field has no Example with that ordinal anywhere and its
/// id is unused. Returns the number of placeholders inserted.
pub fn heal_gaps(
    field: &mut Field,
    folder: &FolderId,
    prefix: &str,
    vocab: &Vocabulary,
    ids: &mut HashSet<String>,
) -> usize {
    let labels: Vec<Option<ProblemLabel>> = field
        .problems
        .iter()
        .map(|entry| entry.label(vocab).ok())
        .collect();
    let mut present: HashSet<ProblemLabel> = labels
        .iter()
        .flatten()
        .filter(|label| label.category == Category::Example)
        .cloned()
        .collect();

    let old = std::mem::take(&mut field.problems);
    let mut healed = Vec::with_capacity(old.len());
    let mut previous: Option<ProblemLabel> = None;
    let mut inserted = 0;

    for (entry, label) in old.into_iter().zip(labels) {
        if let Some(related) = label
            .as_ref()
            .filter(|l| l.category == Category::Related && l.ordinal != Ordinal::Absent)
        {
            let example = ProblemLabel::new(Category::Example, related.ordinal.clone());
            let id = synthesize_id(prefix, folder, &example);
            if previous.as_ref() != Some(&example)
                && !present.contains(&example)
                && !ids.contains(&id)
            {
                let title = vocab.compose_title(
                    &example.display(vocab),
                    vocab.description_part(&entry.title),
                );
                debug!(id = %id, before = %entry.id, "inserted example placeholder");
                healed.push(ProblemEntry::new(id.clone(), title));
                ids.insert(id);
                present.insert(example);
                inserted += 1;
            }
        }
        previous = label;
        healed.push(entry);
    }

    field.problems = healed;
    inserted
}
