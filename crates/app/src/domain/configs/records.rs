//! Config Records

use serde::Serialize;

use crate::{domain::repos::RepoId, ids::TypedId};

/// Config ID
pub type ConfigId = TypedId<ConfigRecord>;

/// Build configuration currently attached to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigRecord {
    pub id: ConfigId,
    pub repo_id: RepoId,

    /// Raw configuration payload, stored as opaque bytes.
    pub data: Vec<u8>,

    /// Lowercase hex SHA-256 of `data`.
    pub hash: String,
}
