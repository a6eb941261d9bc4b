use thiserror::Error;

/// A raw label that yields no `(Category, Ordinal)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("unparseable label: {0:?}")]
    Unparseable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("invalid folder id {0:?}: expected `unit/chapter`")]
    InvalidFolderId(String),
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),
    #[error("invalid id prefix {0:?}")]
    InvalidIdPrefix(String),
}
