//! The per-file numbering table shared by id synthesis and the harvester's
//! filename mapping.

use crate::label::{Category, Ordinal, ProblemLabel};

/// One category's slice of the file-number space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub category: Category,
    /// Tag used in ids for ordinals that do not fit the numeric band.
    pub slug: &'static str,
    pub offset: u32,
    /// Inclusive ordinal range mapped into the band; `None` for categories
    /// that are never numbered.
    pub ordinals: Option<(u32, u32)>,
}

pub const BANDS: [Band; 5] = [
    Band {
        category: Category::Example,
        slug: "ex",
        offset: 0,
        ordinals: Some((1, 10)),
    },
    Band {
        category: Category::Related,
        slug: "rel",
        offset: 10,
        ordinals: Some((1, 10)),
    },
    Band {
        category: Category::Exercise,
        slug: "exc",
        offset: 20,
        ordinals: Some((1, 10)),
    },
    Band {
        category: Category::Question,
        slug: "q",
        offset: 0,
        ordinals: Some((31, u32::MAX)),
    },
    Band {
        category: Category::ThoughtExercise,
        slug: "think",
        offset: 0,
        ordinals: None,
    },
];

pub fn band(category: Category) -> &'static Band {
    match category {
        Category::Example => &BANDS[0],
        Category::Related => &BANDS[1],
        Category::Exercise => &BANDS[2],
        Category::Question => &BANDS[3],
        Category::ThoughtExercise => &BANDS[4],
    }
}

impl Band {
    /// File number for `ordinal`, if it lies inside this band.
    pub fn number_for(&self, ordinal: u32) -> Option<u32> {
        let (lo, hi) = self.ordinals?;
        if ordinal < lo || ordinal > hi {
            return None;
        }
        ordinal.checked_add(self.offset)
    }

    /// Inverse of `number_for`.
    pub fn ordinal_for(&self, number: u32) -> Option<u32> {
        let ordinal = number.checked_sub(self.offset)?;
        self.number_for(ordinal).map(|_| ordinal)
    }
}

/// Map a purely numeric file number back to the label it encodes.
///
/// `1..=10` is Example, `11..=20` Related, `21..=30` Exercise and anything
/// above is Question. Zero encodes nothing.
pub fn label_for_number(number: u32) -> Option<ProblemLabel> {
    BANDS.iter().find_map(|band| {
        band.ordinal_for(number)
            .map(|ordinal| ProblemLabel::new(band.category, Ordinal::Number(ordinal)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_lookup_follows_category() {
        for category in Category::ALL {
            assert_eq!(band(category).category, category);
        }
    }

    #[test]
    fn numeric_bands_are_disjoint() {
        for number in 0..=200u32 {
            let owners = BANDS
                .iter()
                .filter(|band| band.ordinal_for(number).is_some())
                .count();
            let expected = if number == 0 { 0 } else { 1 };
            assert_eq!(owners, expected, "file number {number}");
        }
        assert!(label_for_number(u32::MAX).is_some());
    }

    #[test]
    fn band_edges_map_to_expected_labels() {
        assert_eq!(label_for_number(1), Some(ProblemLabel::numbered(Category::Example, 1)));
        assert_eq!(label_for_number(10), Some(ProblemLabel::numbered(Category::Example, 10)));
        assert_eq!(label_for_number(11), Some(ProblemLabel::numbered(Category::Related, 1)));
        assert_eq!(label_for_number(20), Some(ProblemLabel::numbered(Category::Related, 10)));
        assert_eq!(label_for_number(21), Some(ProblemLabel::numbered(Category::Exercise, 1)));
        assert_eq!(label_for_number(30), Some(ProblemLabel::numbered(Category::Exercise, 10)));
        assert_eq!(label_for_number(31), Some(ProblemLabel::numbered(Category::Question, 31)));
        assert_eq!(label_for_number(0), None);
    }

    #[test]
    fn out_of_band_ordinals_have_no_number() {
        assert_eq!(band(Category::Example).number_for(11), None);
        assert_eq!(band(Category::Related).number_for(0), None);
        assert_eq!(band(Category::Question).number_for(12), None);
        assert_eq!(band(Category::ThoughtExercise).number_for(1), None);
        assert_eq!(band(Category::Exercise).number_for(5), Some(25));
    }
}
