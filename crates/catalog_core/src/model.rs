use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LabelError;
use crate::label::{parse_label, ProblemLabel};
use crate::vocabulary::Vocabulary;

/// The persisted catalog: one material, its subjects, their fields.
///
/// Keys this model does not know about are kept in `extra` at every level so
/// a reconciliation pass never drops hand-edited data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    #[serde(default)]
    pub material_name: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub folder_name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub field_name: String,
    #[serde(default)]
    pub folder_id: String,
    #[serde(default)]
    pub problems: Vec<ProblemEntry>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation_path: Option<String>,
    /// Supplementary media link; stored under the document's `youtubeUrl` key.
    #[serde(
        default,
        rename = "youtubeUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplementary_link: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CatalogDocument {
    /// First-run document: one subject, no fields.
    pub fn skeleton(material_name: &str, subject_name: &str) -> Self {
        Self {
            material_name: material_name.to_string(),
            subjects: vec![Subject {
                subject_name: subject_name.to_string(),
                folder_name: String::new(),
                fields: Vec::new(),
                extra: BTreeMap::new(),
            }],
            extra: BTreeMap::new(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.subjects.iter().flat_map(|subject| subject.fields.iter())
    }

    pub fn entries(&self) -> impl Iterator<Item = &ProblemEntry> {
        self.fields().flat_map(|field| field.problems.iter())
    }

    pub fn entry_mut(&mut self, id: &str) -> Option<&mut ProblemEntry> {
        self.subjects
            .iter_mut()
            .flat_map(|subject| subject.fields.iter_mut())
            .flat_map(|field| field.problems.iter_mut())
            .find(|entry| entry.id == id)
    }
}

impl Field {
    pub fn new(field_name: &str, folder_id: &str) -> Self {
        Self {
            field_name: field_name.to_string(),
            folder_id: folder_id.to_string(),
            problems: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl ProblemEntry {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            explanation_path: None,
            supplementary_link: None,
            extra: BTreeMap::new(),
        }
    }

    /// Category and ordinal, read from the label part of the title.
    pub fn label(&self, vocab: &Vocabulary) -> Result<ProblemLabel, LabelError> {
        parse_label(vocab.label_part(&self.title), vocab)
    }

    pub fn has_explanation(&self) -> bool {
        is_present(&self.explanation_path)
    }

    pub fn has_link(&self) -> bool {
        is_present(&self.supplementary_link)
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{Category, Ordinal};

    #[test]
    fn entry_reads_wire_names_and_keeps_unknown_keys() {
        let raw = r#"{
            "id": "basic_01_01_01",
            "title": "例題1：等加速度直線運動",
            "desc": "",
            "explanationPath": "data/explanations/textbook_basic/01/01/01.html"
        }"#;
        let entry: ProblemEntry = serde_json::from_str(raw).unwrap();
        assert!(entry.has_explanation());
        assert!(!entry.has_link());
        assert_eq!(entry.extra.get("desc"), Some(&Value::String(String::new())));

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["desc"], "");
        assert!(back.get("youtubeUrl").is_none());
    }

    #[test]
    fn empty_enrichment_strings_count_as_absent() {
        let mut entry = ProblemEntry::new("x".into(), "問1".into());
        entry.supplementary_link = Some("  ".into());
        entry.explanation_path = Some(String::new());
        assert!(!entry.has_link());
        assert!(!entry.has_explanation());
    }

    #[test]
    fn label_comes_from_title_prefix() {
        let entry = ProblemEntry::new("x".into(), "類題2：斜面".into());
        let label = entry.label(&Vocabulary::default()).unwrap();
        assert_eq!(label.category, Category::Related);
        assert_eq!(label.ordinal, Ordinal::Number(2));
    }

    #[test]
    fn skeleton_has_one_empty_subject() {
        let doc = CatalogDocument::skeleton("物理基礎", "物理基礎");
        assert_eq!(doc.subjects.len(), 1);
        assert!(doc.subjects[0].fields.is_empty());
        assert_eq!(doc.entries().count(), 0);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["subjects"][0]["folderName"], "");
    }
}
