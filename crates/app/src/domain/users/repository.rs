//! Users Repository

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{database::StoreError, domain::users::records::UserRecord};

const FIND_USER_BY_LOGIN_SQL: &str = include_str!("sql/find_user_by_login.sql");

/// PostgreSQL-backed users repository.
#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            login: row.try_get("user_login")?,
            hash: row.try_get("user_hash")?,
            token: row.try_get("user_token")?,
        })
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_user_by_login(&self, login: &str) -> Result<Option<UserRecord>, StoreError> {
        query_as::<Postgres, UserRecord>(FIND_USER_BY_LOGIN_SQL)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from)
    }
}

#[automock]
#[async_trait]
/// Read access to users owned by the external store.
pub trait UsersRepository: Send + Sync {
    /// Looks up a user by login; `None` when no such user exists.
    async fn find_user_by_login(&self, login: &str) -> Result<Option<UserRecord>, StoreError>;
}
