//! Locating an existing entry for a label coming from tabular data.

use serde::{Deserialize, Serialize};

use crate::label::{Ordinal, ProblemLabel};
use crate::model::ProblemEntry;
use crate::vocabulary::Vocabulary;

/// How a displayed label is tested against an entry's title.
pub trait MatchStrategy {
    fn name(&self) -> &'static str;

    /// Whether `label` (already rendered, e.g. `問1`) matches the label part
    /// of an entry title. `ordinal` is the ordinal the label was rendered from.
    fn matches(&self, title_label: &str, label: &str, ordinal: &Ordinal) -> bool;
}

/// Plain substring containment. `問1` also matches `問12`; the first entry
/// in scan order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainsMatch;

impl MatchStrategy for ContainsMatch {
    fn name(&self) -> &'static str {
        "contains"
    }

    fn matches(&self, title_label: &str, label: &str, _ordinal: &Ordinal) -> bool {
        title_label.contains(label)
    }
}

/// Containment that refuses a match running into more of the same ordinal:
/// a digit after a numeric ordinal, an ASCII letter after a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordBoundaryMatch;

impl MatchStrategy for WordBoundaryMatch {
    fn name(&self) -> &'static str {
        "word-boundary"
    }

    fn matches(&self, title_label: &str, label: &str, ordinal: &Ordinal) -> bool {
        if label.is_empty() {
            return false;
        }
        title_label.match_indices(label).any(|(idx, hit)| {
            let next = title_label[idx + hit.len()..].chars().next();
            match (ordinal, next) {
                (_, None) => true,
                (Ordinal::Number(_), Some(c)) => !c.is_ascii_digit(),
                (Ordinal::Token(_), Some(c)) => !c.is_ascii_alphabetic(),
                (Ordinal::Absent, Some(_)) => true,
            }
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategyKind {
    #[default]
    Contains,
    WordBoundary,
}

static CONTAINS: ContainsMatch = ContainsMatch;
static WORD_BOUNDARY: WordBoundaryMatch = WordBoundaryMatch;

impl MatchStrategyKind {
    pub fn strategy(self) -> &'static dyn MatchStrategy {
        match self {
            MatchStrategyKind::Contains => &CONTAINS,
            MatchStrategyKind::WordBoundary => &WORD_BOUNDARY,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "contains" => Some(Self::Contains),
            "word-boundary" => Some(Self::WordBoundary),
            _ => None,
        }
    }
}

/// Linear scan over a field's entries; first match wins.
pub fn find_entry(
    entries: &[ProblemEntry],
    label: &ProblemLabel,
    vocab: &Vocabulary,
    strategy: &dyn MatchStrategy,
) -> Option<usize> {
    let wanted = label.display(vocab);
    entries.iter().position(|entry| {
        strategy.matches(vocab.label_part(&entry.title), &wanted, &label.ordinal)
    })
}
