//! Repository handlers

use salvo::prelude::StatusError;

use backstage_app::domain::repos::RepoRef;

pub(crate) mod config;
pub(crate) mod hooktoken;

/// Path segments that cannot name a repository are reported like an unknown
/// repository.
pub(crate) fn repo_ref(owner: String, name: String) -> Result<RepoRef, StatusError> {
    RepoRef::new(owner, name).map_err(|_ignored| StatusError::not_found())
}
