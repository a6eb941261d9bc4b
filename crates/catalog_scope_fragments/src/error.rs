use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarvestError {
    #[error("io: {0}")]
    Io(String),
}

impl HarvestError {
    pub(crate) fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        HarvestError::Io(format!("{}: {}", context, err))
    }
}
