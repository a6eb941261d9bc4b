use std::collections::HashMap;

use catalog_core::{
    band, label_for_number, parse_label, synthesize_id, Category, FolderId, Ordinal,
    ProblemLabel, Vocabulary,
};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn ordinal() -> impl Strategy<Value = Ordinal> {
    prop_oneof![
        (1u32..200).prop_map(Ordinal::Number),
        "[a-z]{1,3}".prop_map(Ordinal::Token),
        "[0-9a-z.~_-]{1,4}".prop_map(Ordinal::Token),
        Just(Ordinal::Absent),
    ]
}

fn folder() -> impl Strategy<Value = FolderId> {
    ("0[1-3]", "0[1-4]").prop_map(|(unit, chapter)| FolderId::new(&unit, &chapter).unwrap())
}

proptest! {
    #[test]
    fn distinct_triples_get_distinct_ids(
        triples in prop::collection::vec((folder(), category(), ordinal()), 1..60)
    ) {
        let mut seen: HashMap<String, (FolderId, ProblemLabel)> = HashMap::new();
        for (folder, category, ordinal) in triples {
            let label = ProblemLabel::new(category, ordinal);
            let id = synthesize_id("basic", &folder, &label);
            if let Some(previous) = seen.get(&id) {
                prop_assert_eq!(previous, &(folder.clone(), label.clone()), "id {} reused", id);
            }
            seen.insert(id, (folder, label));
        }
    }

    #[test]
    fn banded_numbers_round_trip(
        category in prop::sample::select(vec![Category::Example, Category::Related, Category::Exercise]),
        n in 1u32..=10,
    ) {
        let number = band(category).number_for(n).unwrap();
        prop_assert_eq!(label_for_number(number), Some(ProblemLabel::numbered(category, n)));
    }

    #[test]
    fn displayed_numbered_labels_reparse(category in category(), n in 1u32..10_000) {
        let vocab = Vocabulary::default();
        let label = ProblemLabel::numbered(category, n);
        let parsed = parse_label(&label.display(&vocab), &vocab).unwrap();
        if category == Category::ThoughtExercise {
            prop_assert_eq!(parsed.ordinal, Ordinal::Absent);
        } else {
            prop_assert_eq!(parsed, label);
        }
    }
}

#[test]
fn file_numbers_from_the_textbook_layout() {
    let example = ProblemLabel::numbered(Category::Example, 3);
    let related = ProblemLabel::numbered(Category::Related, 2);
    let exercise = ProblemLabel::numbered(Category::Exercise, 5);
    assert_eq!(band(Category::Example).number_for(3), Some(3));
    assert_eq!(label_for_number(3), Some(example));
    assert_eq!(band(Category::Related).number_for(2), Some(12));
    assert_eq!(label_for_number(12), Some(related));
    assert_eq!(band(Category::Exercise).number_for(5), Some(25));
    assert_eq!(label_for_number(25), Some(exercise));
}
