//! Configs service errors.

use thiserror::Error;

use crate::{database::StoreError, errors::ErrorKind};

#[derive(Debug, Error)]
pub enum ConfigsServiceError {
    #[error("repository not found")]
    RepoNotFound,

    #[error("repository has no configuration")]
    NoConfig,

    #[error("invalid configuration payload: {0}")]
    InvalidInput(&'static str),

    /// Another writer created the configuration concurrently.
    #[error("configuration was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl ConfigsServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RepoNotFound | Self::NoConfig => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Conflict => ErrorKind::Conflict,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for ConfigsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict => Self::Conflict,
            StoreError::Sql(_) => Self::Store(error),
        }
    }
}
