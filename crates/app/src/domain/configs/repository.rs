//! Configs Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::StoreError,
    domain::{
        configs::{
            data::NewConfig,
            records::{ConfigId, ConfigRecord},
        },
        repos::RepoId,
    },
};

const FIND_CURRENT_CONFIG_SQL: &str = include_str!("sql/find_current_config.sql");
const CREATE_CONFIG_SQL: &str = include_str!("sql/create_config.sql");
const UPDATE_CONFIG_SQL: &str = include_str!("sql/update_config.sql");

/// PostgreSQL-backed configs repository.
#[derive(Debug, Clone)]
pub struct PgConfigsRepository {
    pool: PgPool,
}

impl PgConfigsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for ConfigRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ConfigId::from_i64(row.try_get("config_id")?),
            repo_id: RepoId::from_i64(row.try_get("config_repo_id")?),
            data: row.try_get("config_data")?,
            hash: row.try_get("config_hash")?,
        })
    }
}

#[async_trait]
impl ConfigsRepository for PgConfigsRepository {
    async fn find_current(
        &self,
        repo: RepoId,
    ) -> Result<Option<ConfigRecord>, StoreError> {
        query_as::<Postgres, ConfigRecord>(FIND_CURRENT_CONFIG_SQL)
            .bind(repo.into_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn create(&self, config: NewConfig) -> Result<ConfigRecord, StoreError> {
        query_as::<Postgres, ConfigRecord>(CREATE_CONFIG_SQL)
            .bind(config.repo_id.into_i64())
            .bind(config.data)
            .bind(config.hash)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }

    async fn update(&self, config: ConfigRecord) -> Result<ConfigRecord, StoreError> {
        query_as::<Postgres, ConfigRecord>(UPDATE_CONFIG_SQL)
            .bind(config.id.into_i64())
            .bind(config.repo_id.into_i64())
            .bind(config.data)
            .bind(config.hash)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::from)
    }
}

#[automock]
#[async_trait]
/// Persistence for the current configuration of each repository.
pub trait ConfigsRepository: Send + Sync {
    /// Returns the repository's current configuration, if any.
    async fn find_current(&self, repo: RepoId)
    -> Result<Option<ConfigRecord>, StoreError>;

    /// Inserts a configuration; fails with [`StoreError::Conflict`] if the
    /// repository already has one.
    async fn create(&self, config: NewConfig) -> Result<ConfigRecord, StoreError>;

    /// Replaces data and hash of an existing configuration in place.
    async fn update(&self, config: ConfigRecord) -> Result<ConfigRecord, StoreError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::configs::data::content_hash, test::db::TestDb};

    use super::*;

    fn new_config(repo: i64, data: &[u8]) -> NewConfig {
        NewConfig {
            repo_id: RepoId::from_i64(repo),
            data: data.to_vec(),
            hash: content_hash(data),
        }
    }

    #[tokio::test]
    async fn create_returns_stored_record() -> TestResult {
        let db = TestDb::new().await?;
        let repository = PgConfigsRepository::new(db.pool().clone());

        let created = repository.create(new_config(3, b"pipeline:\n")).await?;

        assert_eq!(created.repo_id, RepoId::from_i64(3));
        assert_eq!(created.data, b"pipeline:\n");
        assert_eq!(created.hash, content_hash(b"pipeline:\n"));

        Ok(())
    }

    #[tokio::test]
    async fn second_create_for_same_repo_conflicts() -> TestResult {
        let db = TestDb::new().await?;
        let repository = PgConfigsRepository::new(db.pool().clone());

        repository.create(new_config(3, b"a")).await?;

        let result = repository.create(new_config(3, b"b")).await;

        assert!(
            matches!(result, Err(StoreError::Conflict)),
            "unique repo constraint should surface as a conflict, got {result:?}"
        );

        repository.create(new_config(4, b"b")).await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_payload_in_place() -> TestResult {
        let db = TestDb::new().await?;
        let repository = PgConfigsRepository::new(db.pool().clone());

        let created = repository.create(new_config(3, b"a")).await?;

        let updated = repository
            .update(ConfigRecord {
                data: vec![0x00, 0xff, 0xfe],
                hash: content_hash(&[0x00, 0xff, 0xfe]),
                ..created.clone()
            })
            .await?;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.repo_id, created.repo_id);
        assert_eq!(updated.data, vec![0x00, 0xff, 0xfe]);

        let current = repository.find_current(RepoId::from_i64(3)).await?;

        assert_eq!(current, Some(updated));

        Ok(())
    }

    #[tokio::test]
    async fn find_current_returns_created_record() -> TestResult {
        let db = TestDb::new().await?;
        let repository = PgConfigsRepository::new(db.pool().clone());

        assert_eq!(repository.find_current(RepoId::from_i64(3)).await?, None);

        let created = repository.create(new_config(3, b"pipeline:\n")).await?;

        assert_eq!(
            repository.find_current(RepoId::from_i64(3)).await?,
            Some(created)
        );
        assert_eq!(repository.find_current(RepoId::from_i64(4)).await?, None);

        Ok(())
    }
}
