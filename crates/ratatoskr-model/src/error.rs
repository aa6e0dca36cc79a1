use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("session identifier must not be empty")]
    EmptySessionId,
    #[error("media identifier must not be empty")]
    EmptyMediaIds,
    #[error("composite key '{0}' has no group delimiter")]
    MissingDelimiter(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
