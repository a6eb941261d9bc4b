use crate::label::{Category, ProblemLabel};
use crate::model::ProblemEntry;
use crate::vocabulary::Vocabulary;

/// Ordinal key for entries whose ordinal is not a number.
pub const UNNUMBERED: u32 = u32::MAX;

/// Position of a category in a field: Example, Related, Question, Exercise,
/// then everything else.
pub fn category_rank(category: Category) -> u8 {
    match category {
        Category::Example => 0,
        Category::Related => 1,
        Category::Question => 2,
        Category::Exercise => 3,
        Category::ThoughtExercise => 4,
    }
}

pub fn sort_key(label: Option<&ProblemLabel>) -> (u8, u32) {
    match label {
        Some(label) => (
            category_rank(label.category),
            label.ordinal.as_number().unwrap_or(UNNUMBERED),
        ),
        None => (4, UNNUMBERED),
    }
}

/// Stable sort of a field's entries by category rank, then numeric ordinal.
pub fn sort_entries(entries: &mut [ProblemEntry], vocab: &Vocabulary) {
    entries.sort_by_cached_key(|entry| sort_key(entry.label(vocab).ok().as_ref()));
}
