//! Repos Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::StoreError,
    domain::repos::records::{RepoId, RepoRecord},
};

const FIND_REPO_BY_OWNER_AND_NAME_SQL: &str = include_str!("sql/find_repo_by_owner_and_name.sql");

/// PostgreSQL-backed repos repository.
#[derive(Debug, Clone)]
pub struct PgReposRepository {
    pool: PgPool,
}

impl PgReposRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for RepoRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: RepoId::from_i64(row.try_get("repo_id")?),
            owner: row.try_get("repo_owner")?,
            name: row.try_get("repo_name")?,
            hash: row.try_get("repo_hash")?,
        })
    }
}

#[async_trait]
impl ReposRepository for PgReposRepository {
    async fn find_repo_by_owner_and_name(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<RepoRecord>, StoreError> {
        query_as::<Postgres, RepoRecord>(FIND_REPO_BY_OWNER_AND_NAME_SQL)
            .bind(owner)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)
    }
}

#[automock]
#[async_trait]
/// Read access to repositories owned by the external store.
pub trait ReposRepository: Send + Sync {
    /// Looks up a repository by its `owner/name` address.
    async fn find_repo_by_owner_and_name(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<RepoRecord>, StoreError>;
}
