use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::label::Category;

/// Category markers and the title separator used by the textbook.
///
/// The defaults are the textbook's own vocabulary. A title is written as
/// `"{marker}{ordinal}{separator}{description}"`, e.g. `例題1：等加速度直線運動`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub example: String,
    pub related: String,
    pub exercise: String,
    pub question: String,
    pub thought: String,
    pub separator: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            example: "例題".to_string(),
            related: "類題".to_string(),
            exercise: "演習問題".to_string(),
            question: "問".to_string(),
            thought: "思考学習".to_string(),
            separator: "：".to_string(),
        }
    }
}

impl Vocabulary {
    pub fn marker(&self, category: Category) -> &str {
        match category {
            Category::Example => &self.example,
            Category::Related => &self.related,
            Category::Exercise => &self.exercise,
            Category::Question => &self.question,
            Category::ThoughtExercise => &self.thought,
        }
    }

    /// Reject vocabularies the parser cannot work with: empty markers would
    /// match every label, and an empty separator would make every title
    /// collapse to its first character.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for category in Category::ALL {
            if self.marker(category).trim().is_empty() {
                return Err(CatalogError::InvalidVocabulary(format!(
                    "marker for {} is empty",
                    category.as_str()
                )));
            }
        }
        if self.separator.is_empty() {
            return Err(CatalogError::InvalidVocabulary(
                "separator is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Text preceding the first separator, trimmed.
    pub fn label_part<'a>(&self, title: &'a str) -> &'a str {
        match title.split_once(self.separator.as_str()) {
            Some((head, _)) => head.trim(),
            None => title.trim(),
        }
    }

    /// Text following the first separator, if any.
    pub fn description_part<'a>(&self, title: &'a str) -> Option<&'a str> {
        title
            .split_once(self.separator.as_str())
            .map(|(_, tail)| tail.trim())
            .filter(|tail| !tail.is_empty())
    }

    pub fn compose_title(&self, label: &str, description: Option<&str>) -> String {
        match description.map(str::trim).filter(|d| !d.is_empty()) {
            Some(description) => format!("{}{}{}", label, self.separator, description),
            None => label.to_string(),
        }
    }
}
