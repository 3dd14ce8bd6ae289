//! Token service errors.

use thiserror::Error;

use crate::{
    auth::{ResolveError, TokenError},
    database::StoreError,
    errors::ErrorKind,
};

#[derive(Debug, Error)]
pub enum TokensServiceError {
    #[error("subject not found")]
    SubjectNotFound,

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl TokensServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SubjectNotFound => ErrorKind::NotFound,
            Self::Token(source) => source.kind(),
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<TokenError> for TokensServiceError {
    fn from(error: TokenError) -> Self {
        Self::Token(error)
    }
}

impl From<StoreError> for TokensServiceError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

impl From<ResolveError> for TokensServiceError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::SubjectNotFound => Self::SubjectNotFound,
            ResolveError::Store(source) => Self::Store(source),
        }
    }
}
