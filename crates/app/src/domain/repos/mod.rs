//! Repositories

pub mod records;
mod repository;

pub use records::{RepoId, RepoRecord, RepoRef, RepoRefError};
pub use repository::*;
