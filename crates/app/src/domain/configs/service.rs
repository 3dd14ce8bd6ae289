//! Configs service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    database::StoreError,
    domain::{
        configs::{
            data::{NewConfig, content_hash},
            errors::ConfigsServiceError,
            records::ConfigRecord,
            repository::{ConfigsRepository, PgConfigsRepository},
        },
        repos::{PgReposRepository, RepoId, RepoRecord, RepoRef, ReposRepository},
    },
};

/// Config service backed by the store repositories.
#[derive(Clone)]
pub struct StoreConfigsService {
    repos: Arc<dyn ReposRepository>,
    configs: Arc<dyn ConfigsRepository>,
}

impl fmt::Debug for StoreConfigsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfigsService").finish_non_exhaustive()
    }
}

impl StoreConfigsService {
    #[must_use]
    pub fn new(repos: Arc<dyn ReposRepository>, configs: Arc<dyn ConfigsRepository>) -> Self {
        Self { repos, configs }
    }

    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgReposRepository::new(pool.clone())),
            Arc::new(PgConfigsRepository::new(pool)),
        )
    }

    async fn resolve_repo(&self, repo: &RepoRef) -> Result<RepoRecord, ConfigsServiceError> {
        self.repos
            .find_repo_by_owner_and_name(&repo.owner, &repo.name)
            .await?
            .ok_or(ConfigsServiceError::RepoNotFound)
    }

    async fn create_or_update(
        &self,
        repo_id: RepoId,
        data: Vec<u8>,
        hash: String,
    ) -> Result<ConfigRecord, ConfigsServiceError> {
        let created = self
            .configs
            .create(NewConfig {
                repo_id,
                data: data.clone(),
                hash: hash.clone(),
            })
            .await;

        match created {
            Ok(created) => Ok(created),
            Err(StoreError::Conflict) => {
                warn!(%repo_id, "config created concurrently, retrying as update");

                let current = self
                    .configs
                    .find_current(repo_id)
                    .await?
                    .ok_or(ConfigsServiceError::Conflict)?;

                self.replace(current, data, hash).await
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn replace(
        &self,
        current: ConfigRecord,
        data: Vec<u8>,
        hash: String,
    ) -> Result<ConfigRecord, ConfigsServiceError> {
        self.configs
            .update(ConfigRecord {
                id: current.id,
                repo_id: current.repo_id,
                data,
                hash,
            })
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl ConfigsService for StoreConfigsService {
    async fn get_config(&self, repo: RepoRef) -> Result<ConfigRecord, ConfigsServiceError> {
        let record = self.resolve_repo(&repo).await?;

        self.configs
            .find_current(record.id)
            .await?
            .ok_or(ConfigsServiceError::NoConfig)
    }

    async fn upsert_config(
        &self,
        repo: RepoRef,
        raw: Vec<u8>,
    ) -> Result<ConfigRecord, ConfigsServiceError> {
        let record = self.resolve_repo(&repo).await?;

        if raw.is_empty() {
            return Err(ConfigsServiceError::InvalidInput("configuration is empty"));
        }

        let current = self.configs.find_current(record.id).await?;

        let hash = content_hash(&raw);
        let data = raw;

        let stored = match current {
            Some(current) => self.replace(current, data, hash).await?,
            None => self.create_or_update(record.id, data, hash).await?,
        };

        info!(
            repo = %record.full_name(),
            config_id = %stored.id,
            hash = %stored.hash,
            "stored repository config"
        );

        Ok(stored)
    }
}

#[automock]
#[async_trait]
/// Read and write the single current configuration of a repository.
pub trait ConfigsService: Send + Sync {
    /// Returns the current configuration; never creates one.
    async fn get_config(&self, repo: RepoRef) -> Result<ConfigRecord, ConfigsServiceError>;

    /// Creates the repository's configuration, or replaces data and hash of
    /// the existing one while keeping its identity.
    async fn upsert_config(
        &self,
        repo: RepoRef,
        raw: Vec<u8>,
    ) -> Result<ConfigRecord, ConfigsServiceError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::domain::{
        configs::{MockConfigsRepository, records::ConfigId},
        repos::MockReposRepository,
    };

    use super::*;

    const REPO_ID: RepoId = RepoId::from_i64(11);

    fn repo_ref() -> RepoRef {
        RepoRef {
            owner: "octocat".to_string(),
            name: "hello-world".to_string(),
        }
    }

    fn known_repo() -> MockReposRepository {
        let mut repos = MockReposRepository::new();

        repos
            .expect_find_repo_by_owner_and_name()
            .withf(|owner, name| owner == "octocat" && name == "hello-world")
            .returning(|owner, name| {
                Ok(Some(RepoRecord {
                    id: REPO_ID,
                    owner: owner.to_string(),
                    name: name.to_string(),
                    hash: "repo-secret".to_string(),
                }))
            });

        repos
    }

    fn unknown_repo() -> MockReposRepository {
        let mut repos = MockReposRepository::new();

        repos
            .expect_find_repo_by_owner_and_name()
            .once()
            .returning(|_, _| Ok(None));

        repos
    }

    fn stored(id: i64, data: &str) -> ConfigRecord {
        ConfigRecord {
            id: ConfigId::from_i64(id),
            repo_id: REPO_ID,
            data: data.as_bytes().to_vec(),
            hash: content_hash(data.as_bytes()),
        }
    }

    fn service(repos: MockReposRepository, configs: MockConfigsRepository) -> StoreConfigsService {
        StoreConfigsService::new(Arc::new(repos), Arc::new(configs))
    }

    #[tokio::test]
    async fn upsert_creates_config_when_none_exists() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs
            .expect_find_current()
            .once()
            .with(eq(REPO_ID))
            .returning(|_| Ok(None));

        configs
            .expect_create()
            .once()
            .withf(|config| {
                config.repo_id == REPO_ID
                    && config.data == b"a"
                    && config.hash == content_hash(b"a")
            })
            .returning(|config| {
                Ok(ConfigRecord {
                    id: ConfigId::from_i64(1),
                    repo_id: config.repo_id,
                    data: config.data,
                    hash: config.hash,
                })
            });

        configs.expect_update().never();

        let record = service(known_repo(), configs)
            .upsert_config(repo_ref(), b"a".to_vec())
            .await?;

        assert!(record.id.into_i64() > 0, "created config must have an id");
        assert_eq!(record.hash, content_hash(b"a"));

        Ok(())
    }

    #[tokio::test]
    async fn upsert_updates_existing_config_in_place() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs
            .expect_find_current()
            .once()
            .returning(|_| Ok(Some(stored(1, "a"))));

        configs.expect_create().never();

        configs
            .expect_update()
            .once()
            .withf(|config| {
                config.id == ConfigId::from_i64(1)
                    && config.repo_id == REPO_ID
                    && config.data == b"b"
                    && config.hash == content_hash(b"b")
            })
            .returning(Ok);

        let record = service(known_repo(), configs)
            .upsert_config(repo_ref(), b"b".to_vec())
            .await?;

        assert_eq!(record.id, ConfigId::from_i64(1));
        assert_eq!(record.hash, content_hash(b"b"));

        Ok(())
    }

    #[tokio::test]
    async fn upsert_writes_even_when_content_is_unchanged() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs
            .expect_find_current()
            .once()
            .returning(|_| Ok(Some(stored(3, "same"))));

        configs.expect_update().once().returning(Ok);

        let record = service(known_repo(), configs)
            .upsert_config(repo_ref(), b"same".to_vec())
            .await?;

        assert_eq!(record, stored(3, "same"));

        Ok(())
    }

    #[tokio::test]
    async fn upsert_unknown_repo_fails_without_writing() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs.expect_find_current().never();
        configs.expect_create().never();
        configs.expect_update().never();

        let result = service(unknown_repo(), configs)
            .upsert_config(repo_ref(), b"a".to_vec())
            .await;

        assert!(
            matches!(result, Err(ConfigsServiceError::RepoNotFound)),
            "expected RepoNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn upsert_rejects_empty_payload_without_writing() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs.expect_find_current().never();
        configs.expect_create().never();
        configs.expect_update().never();

        let result = service(known_repo(), configs)
            .upsert_config(repo_ref(), Vec::new())
            .await;

        assert!(
            matches!(result, Err(ConfigsServiceError::InvalidInput(_))),
            "expected InvalidInput, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn upsert_stores_non_utf8_payload_verbatim() -> TestResult {
        const RAW: [u8; 4] = [0x00, 0xff, 0xfe, 0x0a];

        let mut configs = MockConfigsRepository::new();

        configs.expect_find_current().once().returning(|_| Ok(None));

        configs
            .expect_create()
            .once()
            .withf(|config| config.data == RAW && config.hash == content_hash(&RAW))
            .returning(|config| {
                Ok(ConfigRecord {
                    id: ConfigId::from_i64(4),
                    repo_id: config.repo_id,
                    data: config.data,
                    hash: config.hash,
                })
            });

        let record = service(known_repo(), configs)
            .upsert_config(repo_ref(), RAW.to_vec())
            .await?;

        assert_eq!(record.data, RAW);

        Ok(())
    }

    #[tokio::test]
    async fn upsert_retries_create_conflict_as_update() -> TestResult {
        let mut configs = MockConfigsRepository::new();
        let mut lookups = 0;

        configs
            .expect_find_current()
            .times(2)
            .returning(move |_| {
                lookups += 1;

                if lookups == 1 {
                    Ok(None)
                } else {
                    Ok(Some(stored(9, "theirs")))
                }
            });

        configs
            .expect_create()
            .once()
            .returning(|_| Err(StoreError::Conflict));

        configs
            .expect_update()
            .once()
            .withf(|config| config.id == ConfigId::from_i64(9) && config.data == b"mine")
            .returning(Ok);

        let record = service(known_repo(), configs)
            .upsert_config(repo_ref(), b"mine".to_vec())
            .await?;

        assert_eq!(record, stored(9, "mine"));

        Ok(())
    }

    #[tokio::test]
    async fn upsert_reports_conflict_when_retry_finds_nothing() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs
            .expect_find_current()
            .times(2)
            .returning(|_| Ok(None));

        configs
            .expect_create()
            .once()
            .returning(|_| Err(StoreError::Conflict));

        configs.expect_update().never();

        let result = service(known_repo(), configs)
            .upsert_config(repo_ref(), b"mine".to_vec())
            .await;

        assert!(
            matches!(result, Err(ConfigsServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_returns_current_config() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs
            .expect_find_current()
            .once()
            .with(eq(REPO_ID))
            .returning(|_| Ok(Some(stored(4, "pipeline: {}"))));

        let record = service(known_repo(), configs).get_config(repo_ref()).await?;

        assert_eq!(record, stored(4, "pipeline: {}"));

        Ok(())
    }

    #[tokio::test]
    async fn get_without_config_fails_and_never_creates() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs
            .expect_find_current()
            .once()
            .returning(|_| Ok(None));

        configs.expect_create().never();
        configs.expect_update().never();

        let result = service(known_repo(), configs).get_config(repo_ref()).await;

        assert!(
            matches!(result, Err(ConfigsServiceError::NoConfig)),
            "expected NoConfig, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_repo_skips_config_lookup() -> TestResult {
        let mut configs = MockConfigsRepository::new();

        configs.expect_find_current().never();

        let result = service(unknown_repo(), configs).get_config(repo_ref()).await;

        assert!(
            matches!(result, Err(ConfigsServiceError::RepoNotFound)),
            "expected RepoNotFound, got {result:?}"
        );

        Ok(())
    }
}
