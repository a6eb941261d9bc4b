//! Label parsing: raw problem labels (`例題3`, `問abc`, `演習問題12`) to a
//! typed `(Category, Ordinal)` pair.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;
use crate::vocabulary::Vocabulary;

/// The closed set of problem kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Example,
    Related,
    Exercise,
    Question,
    ThoughtExercise,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Example,
        Category::Related,
        Category::Exercise,
        Category::Question,
        Category::ThoughtExercise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Example => "example",
            Category::Related => "related",
            Category::Exercise => "exercise",
            Category::Question => "question",
            Category::ThoughtExercise => "thought_exercise",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which the parser probes categories.
///
/// Markers are substrings of one another (`演習問題` contains `問`), so the
/// exercise marker must be tried before the question marker. The question
/// entry appears once here; the final fallback to Question is implicit.
pub const PARSE_PRIORITY: [Category; 5] = [
    Category::Exercise,
    Category::Example,
    Category::Related,
    Category::Question,
    Category::ThoughtExercise,
];

/// Per-category sequence number of a problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ordinal {
    /// Always positive.
    Number(u32),
    /// Alphabetic (`a`, `abc`) or opaque (a fragment file stem) token.
    Token(String),
    Absent,
}

impl Ordinal {
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Ordinal::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ordinal::Number(n) => write!(f, "{}", n),
            Ordinal::Token(token) => f.write_str(token),
            Ordinal::Absent => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemLabel {
    pub category: Category,
    pub ordinal: Ordinal,
}

impl ProblemLabel {
    pub fn new(category: Category, ordinal: Ordinal) -> Self {
        Self { category, ordinal }
    }

    pub fn numbered(category: Category, n: u32) -> Self {
        Self::new(category, Ordinal::Number(n))
    }

    /// A Question label carrying an opaque name verbatim (no digit extraction).
    pub fn opaque(name: &str) -> Self {
        Self::new(Category::Question, Ordinal::Token(name.to_string()))
    }

    /// The label as written in titles: `"{marker}{ordinal}"`.
    pub fn display(&self, vocab: &Vocabulary) -> String {
        format!("{}{}", vocab.marker(self.category), self.ordinal)
    }
}

/// Parse a raw label into its category and ordinal.
///
/// Markers are matched as prefixes, except the thought-exercise marker which
/// may appear anywhere. A non-empty label that matches no marker falls back
/// to Question. Only a blank label is unparseable.
pub fn parse_label(raw: &str, vocab: &Vocabulary) -> Result<ProblemLabel, LabelError> {
    let label = raw.trim();
    if label.is_empty() {
        return Err(LabelError::Unparseable(raw.to_string()));
    }

    for category in PARSE_PRIORITY {
        let marker = vocab.marker(category);
        if category == Category::ThoughtExercise {
            if label.contains(marker) {
                return Ok(ProblemLabel::new(category, Ordinal::Absent));
            }
            continue;
        }
        if let Some(rest) = label.strip_prefix(marker) {
            return Ok(ProblemLabel::new(category, ordinal_from(rest)));
        }
    }

    Ok(ProblemLabel::new(Category::Question, ordinal_from(label)))
}

fn ordinal_from(rest: &str) -> Ordinal {
    if let Some(n) = first_digit_run(rest).filter(|n| *n > 0) {
        return Ordinal::Number(n);
    }
    match trailing_alpha(rest) {
        Some(token) => Ordinal::Token(token.to_string()),
        None => Ordinal::Absent,
    }
}

fn first_digit_run(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run = &text[start..];
    let end = run
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(run.len());
    run[..end].parse().ok()
}

fn trailing_alpha(text: &str) -> Option<&str> {
    let text = text.trim_end();
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(idx, _)| idx)?;
    Some(&text[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ProblemLabel {
        parse_label(raw, &Vocabulary::default()).expect("parse label")
    }

    #[test]
    fn parses_each_category() {
        assert_eq!(parse("例題3"), ProblemLabel::numbered(Category::Example, 3));
        assert_eq!(parse("類題3"), ProblemLabel::numbered(Category::Related, 3));
        assert_eq!(parse("演習問題4"), ProblemLabel::numbered(Category::Exercise, 4));
        assert_eq!(parse("問12"), ProblemLabel::numbered(Category::Question, 12));
        assert_eq!(
            parse("思考学習"),
            ProblemLabel::new(Category::ThoughtExercise, Ordinal::Absent)
        );
    }

    #[test]
    fn exercise_wins_over_embedded_question_marker() {
        // "演習問題" contains "問"; probing Question first would misfile it.
        let label = parse("演習問題2");
        assert_eq!(label.category, Category::Exercise);
        assert_eq!(label.ordinal, Ordinal::Number(2));
    }

    #[test]
    fn thought_exercise_has_no_ordinal_even_with_digits() {
        let label = parse("思考学習2");
        assert_eq!(label, ProblemLabel::new(Category::ThoughtExercise, Ordinal::Absent));
    }

    #[test]
    fn alphabetic_question_labels_use_trailing_token() {
        assert_eq!(
            parse("問abc"),
            ProblemLabel::new(Category::Question, Ordinal::Token("abc".into()))
        );
        assert_eq!(
            parse("問a"),
            ProblemLabel::new(Category::Question, Ordinal::Token("a".into()))
        );
        assert_eq!(
            parse("問 B "),
            ProblemLabel::new(Category::Question, Ordinal::Token("B".into()))
        );
    }

    #[test]
    fn first_digit_run_is_the_ordinal() {
        assert_eq!(parse("演習問題12(2)"), ProblemLabel::numbered(Category::Exercise, 12));
        assert_eq!(parse("例題1 等加速度"), ProblemLabel::numbered(Category::Example, 1));
    }

    #[test]
    fn zero_is_not_a_numeric_ordinal() {
        assert_eq!(parse("例題0"), ProblemLabel::new(Category::Example, Ordinal::Absent));
    }

    #[test]
    fn unknown_labels_fall_back_to_question() {
        assert_eq!(parse("大問7"), ProblemLabel::new(Category::Question, Ordinal::Number(7)));
        assert_eq!(
            parse("pv-graph"),
            ProblemLabel::new(Category::Question, Ordinal::Token("graph".into()))
        );
        assert_eq!(parse("まとめ"), ProblemLabel::new(Category::Question, Ordinal::Absent));
    }

    #[test]
    fn blank_labels_are_unparseable() {
        let vocab = Vocabulary::default();
        assert_eq!(
            parse_label("   ", &vocab),
            Err(LabelError::Unparseable("   ".into()))
        );
        assert!(parse_label("", &vocab).is_err());
    }

    #[test]
    fn display_round_trips_through_parser() {
        let vocab = Vocabulary::default();
        for label in [
            ProblemLabel::numbered(Category::Example, 3),
            ProblemLabel::numbered(Category::Exercise, 5),
            ProblemLabel::new(Category::Question, Ordinal::Token("abc".into())),
            ProblemLabel::new(Category::ThoughtExercise, Ordinal::Absent),
        ] {
            assert_eq!(parse_label(&label.display(&vocab), &vocab), Ok(label));
        }
    }

    #[test]
    fn custom_vocabulary_keeps_priority_order() {
        let vocab = Vocabulary {
            example: "example problem ".into(),
            related: "related problem ".into(),
            exercise: "exercise question ".into(),
            question: "question ".into(),
            thought: "reflection".into(),
            separator: ": ".into(),
        };
        let label = parse_label("exercise question 4", &vocab).unwrap();
        assert_eq!(label, ProblemLabel::numbered(Category::Exercise, 4));
        let label = parse_label("question 12", &vocab).unwrap();
        assert_eq!(label, ProblemLabel::numbered(Category::Question, 12));
    }
}
