//! Repository Records

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::ids::TypedId;

/// Repository ID
pub type RepoId = TypedId<RepoRecord>;

/// Repository as stored by the external system.
#[derive(Clone)]
pub struct RepoRecord {
    pub id: RepoId,
    pub owner: String,
    pub name: String,

    /// Per-repository signing secret.
    pub hash: String,
}

impl RepoRecord {
    /// `owner/name` path of the repository.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Debug for RepoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoRecord")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("hash", &"**redacted**")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RepoRefError {
    #[error("repository path must be owner/name")]
    InvalidFormat,
}

/// Caller-supplied repository address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Builds a reference from its two segments, rejecting empty ones and
    /// segments that contain the `/` separator.
    ///
    /// # Errors
    ///
    /// Returns [`RepoRefError::InvalidFormat`] when either segment is empty
    /// or contains `/`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self, RepoRefError> {
        let owner = owner.into();
        let name = name.into();

        if !is_valid_segment(&owner) || !is_valid_segment(&name) {
            return Err(RepoRefError::InvalidFormat);
        }

        Ok(Self { owner, name })
    }

    /// Parses an `owner/name` path.
    ///
    /// # Errors
    ///
    /// Returns [`RepoRefError::InvalidFormat`] when `path` is not exactly two
    /// valid segments.
    pub fn parse(path: &str) -> Result<Self, RepoRefError> {
        let (owner, name) = path.split_once('/').ok_or(RepoRefError::InvalidFormat)?;

        Self::new(owner, name)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains('/')
}

impl FromStr for RepoRef {
    type Err = RepoRefError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
