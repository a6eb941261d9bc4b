use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use catalog_core::{MatchStrategyKind, ReconcileContext, Vocabulary, DEFAULT_ID_PREFIX};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "catalog.toml";
pub const DEFAULT_DOCUMENT: &str = "data/materials/textbook_basic.json";
pub const DEFAULT_FRAGMENTS: &str = "data/explanations/textbook_basic";
pub const DEFAULT_MATERIAL_NAME: &str = "物理基礎";

/// Resolved settings for one project root.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub root: PathBuf,
    /// Catalog document, relative to `root` unless absolute.
    pub document: PathBuf,
    /// Fragment store, relative to `root` unless absolute.
    pub fragments: PathBuf,
    pub id_prefix: String,
    pub material_name: String,
    pub subject_name: String,
    pub match_strategy: MatchStrategyKind,
    pub vocabulary: Vocabulary,
    pub field_names: BTreeMap<String, String>,
    /// The `catalog.toml` the values came from, if any.
    pub source: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn defaults(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            document: PathBuf::from(DEFAULT_DOCUMENT),
            fragments: PathBuf::from(DEFAULT_FRAGMENTS),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            material_name: DEFAULT_MATERIAL_NAME.to_string(),
            subject_name: DEFAULT_MATERIAL_NAME.to_string(),
            match_strategy: MatchStrategyKind::default(),
            vocabulary: Vocabulary::default(),
            field_names: BTreeMap::new(),
            source: None,
        }
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(&self.document)
    }

    pub fn context(&self) -> ReconcileContext {
        ReconcileContext {
            vocabulary: self.vocabulary.clone(),
            id_prefix: self.id_prefix.clone(),
            match_strategy: self.match_strategy,
            field_names: self.field_names.clone(),
            subject_name: self.subject_name.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct CatalogTomlConfig {
    catalog: Option<CatalogTomlSection>,
    vocabulary: Option<Vocabulary>,
    fields: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogTomlSection {
    document: Option<PathBuf>,
    fragments: Option<PathBuf>,
    id_prefix: Option<String>,
    material_name: Option<String>,
    subject_name: Option<String>,
    match_strategy: Option<MatchStrategyKind>,
}

/// Read `catalog.toml` next to `root_hint` (or in it, for a directory).
/// A missing file yields defaults; an unreadable or malformed one is an error.
pub fn resolve_catalog_config(root_hint: &Path) -> Result<CatalogConfig, String> {
    let root = root_for_hint(root_hint);
    let config_path = root.join(CONFIG_FILE);
    let mut config = CatalogConfig::defaults(&root);
    if !config_path.exists() {
        return Ok(config);
    }

    let raw = std::fs::read_to_string(&config_path)
        .map_err(|err| format!("read {}: {}", config_path.display(), err))?;
    let parsed: CatalogTomlConfig =
        toml::from_str(&raw).map_err(|err| format!("parse {}: {}", config_path.display(), err))?;

    if let Some(section) = parsed.catalog {
        if let Some(document) = section.document {
            config.document = document;
        }
        if let Some(fragments) = section.fragments {
            config.fragments = fragments;
        }
        if let Some(prefix) = section.id_prefix {
            config.id_prefix = prefix;
        }
        if let Some(material) = section.material_name {
            if section.subject_name.is_none() {
                config.subject_name = material.clone();
            }
            config.material_name = material;
        }
        if let Some(subject) = section.subject_name {
            config.subject_name = subject;
        }
        if let Some(strategy) = section.match_strategy {
            config.match_strategy = strategy;
        }
    }
    if let Some(vocabulary) = parsed.vocabulary {
        vocabulary
            .validate()
            .map_err(|err| format!("{}: {}", config_path.display(), err))?;
        config.vocabulary = vocabulary;
    }
    if let Some(fields) = parsed.fields {
        config.field_names = fields;
    }
    config.source = Some(config_path);
    Ok(config)
}

fn root_for_hint(root_hint: &Path) -> PathBuf {
    if root_hint.is_file() {
        root_hint
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    } else {
        root_hint.to_path_buf()
    }
}
