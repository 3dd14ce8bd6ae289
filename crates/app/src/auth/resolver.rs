//! Subject secret resolution.
//!
//! Secrets are read from the store on every call, so rotating a subject's
//! secret immediately invalidates every token signed with the old one.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::{
    auth::secret::SubjectSecret,
    database::StoreError,
    domain::{repos::ReposRepository, users::UsersRepository},
};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("subject not found")]
    SubjectNotFound,

    #[error("storage error")]
    Store(#[from] StoreError),
}

/// Store-backed secret resolver.
#[derive(Clone)]
pub struct StoreSecretResolver {
    users: Arc<dyn UsersRepository>,
    repos: Arc<dyn ReposRepository>,
}

impl fmt::Debug for StoreSecretResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSecretResolver").finish_non_exhaustive()
    }
}

impl StoreSecretResolver {
    #[must_use]
    pub fn new(users: Arc<dyn UsersRepository>, repos: Arc<dyn ReposRepository>) -> Self {
        Self { users, repos }
    }
}

#[async_trait]
impl SecretResolver for StoreSecretResolver {
    async fn resolve_user_secret(&self, login: &str) -> Result<SubjectSecret, ResolveError> {
        self.users
            .find_user_by_login(login)
            .await?
            .map(|user| SubjectSecret::from(user.hash))
            .ok_or(ResolveError::SubjectNotFound)
    }

    async fn resolve_repo_secret(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<SubjectSecret, ResolveError> {
        self.repos
            .find_repo_by_owner_and_name(owner, name)
            .await?
            .map(|repo| SubjectSecret::from(repo.hash))
            .ok_or(ResolveError::SubjectNotFound)
    }
}

#[automock]
#[async_trait]
/// Resolves the current signing secret of a token subject.
pub trait SecretResolver: Send + Sync {
    async fn resolve_user_secret(&self, login: &str) -> Result<SubjectSecret, ResolveError>;

    async fn resolve_repo_secret(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<SubjectSecret, ResolveError>;
}
