//! Token service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::SignedDuration;
use mockall::automock;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::{
    auth::{
        SecretResolver, StoreSecretResolver, SubjectSecret, TokenCodec, TokenKind, TokenSubject,
        TokensServiceError, VerifiedToken,
    },
    domain::{
        repos::PgReposRepository,
        users::{PgUsersRepository, UsersRepository},
    },
};

/// Default lifetime of session tokens.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(72);

/// Token issuance settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSettings {
    pub session_ttl: SignedDuration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl TokenSettings {
    /// Lifetime of tokens of the given kind; hook tokens do not expire.
    #[must_use]
    pub const fn ttl_for(&self, kind: TokenKind) -> Option<SignedDuration> {
        match kind {
            TokenKind::Session => Some(self.session_ttl),
            TokenKind::Hook => None,
        }
    }
}

/// Token issuance result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub kind: TokenKind,
    pub subject: String,
    pub token: String,
}

/// Token service backed by the store repositories.
#[derive(Clone)]
pub struct StoreTokensService {
    users: Arc<dyn UsersRepository>,
    resolver: Arc<dyn SecretResolver>,
    codec: TokenCodec,
    settings: TokenSettings,
}

impl fmt::Debug for StoreTokensService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreTokensService")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl StoreTokensService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersRepository>,
        resolver: Arc<dyn SecretResolver>,
        codec: TokenCodec,
        settings: TokenSettings,
    ) -> Self {
        Self {
            users,
            resolver,
            codec,
            settings,
        }
    }

    #[must_use]
    pub fn from_pool(pool: PgPool, settings: TokenSettings) -> Self {
        let users = Arc::new(PgUsersRepository::new(pool.clone()));
        let repos = Arc::new(PgReposRepository::new(pool));

        Self::new(
            users.clone(),
            Arc::new(StoreSecretResolver::new(users, repos)),
            TokenCodec::default(),
            settings,
        )
    }

    async fn resolve_secret(
        &self,
        subject: &TokenSubject,
    ) -> Result<SubjectSecret, TokensServiceError> {
        let secret = match subject {
            TokenSubject::Session { login } => self.resolver.resolve_user_secret(login).await?,
            TokenSubject::Hook { repo } => {
                self.resolver
                    .resolve_repo_secret(&repo.owner, &repo.name)
                    .await?
            }
        };

        Ok(secret)
    }

    async fn issue(&self, subject: TokenSubject) -> Result<IssuedToken, TokensServiceError> {
        let secret = self.resolve_secret(&subject).await?;

        let kind = subject.kind();
        let subject = subject.subject();

        let token = self.codec.issue(
            kind,
            &subject,
            secret.as_bytes(),
            self.settings.ttl_for(kind),
        )?;

        info!(%kind, %subject, "issued token");

        Ok(IssuedToken {
            kind,
            subject,
            token,
        })
    }
}

#[async_trait]
impl TokensService for StoreTokensService {
    async fn issue_session_token(&self, login: &str) -> Result<IssuedToken, TokensServiceError> {
        let subject = TokenSubject::from_parts(TokenKind::Session, login)
            .map_err(|_ignored| TokensServiceError::SubjectNotFound)?;

        self.issue(subject).await
    }

    async fn issue_hook_token(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<IssuedToken, TokensServiceError> {
        let subject = TokenSubject::from_parts(TokenKind::Hook, &format!("{owner}/{name}"))
            .map_err(|_ignored| TokensServiceError::SubjectNotFound)?;

        self.issue(subject).await
    }

    fn verify_token(
        &self,
        token: &str,
        secret: &[u8],
    ) -> Result<VerifiedToken, TokensServiceError> {
        self.codec.verify(token, secret).map_err(Into::into)
    }

    async fn authenticate(&self, token: &str) -> Result<VerifiedToken, TokensServiceError> {
        let claims = self.codec.peek(token)?;
        let subject = TokenSubject::from_parts(claims.kind, &claims.subject)?;

        let secret = self.resolve_secret(&subject).await?;

        let verified = self.codec.verify(token, secret.as_bytes())?;

        debug!(kind = %verified.kind, subject = %verified.subject, "verified token");

        Ok(verified)
    }

    async fn git_token(&self, login: &str) -> Result<String, TokensServiceError> {
        self.users
            .find_user_by_login(login)
            .await?
            .map(|user| user.token)
            .ok_or(TokensServiceError::SubjectNotFound)
    }
}

#[automock]
#[async_trait]
/// Token operations exposed to the control-plane handlers.
pub trait TokensService: Send + Sync {
    /// Issues an expiring session token signed with the user's secret.
    async fn issue_session_token(&self, login: &str) -> Result<IssuedToken, TokensServiceError>;

    /// Issues a non-expiring hook token signed with the repository's secret.
    async fn issue_hook_token(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<IssuedToken, TokensServiceError>;

    /// Verifies a token against an explicitly supplied secret.
    ///
    /// # Errors
    ///
    /// Returns [`TokensServiceError::Token`] when the token is malformed,
    /// its signature does not match `secret`, or it has expired.
    fn verify_token(&self, token: &str, secret: &[u8])
    -> Result<VerifiedToken, TokensServiceError>;

    /// Verifies a token against the current secret of the subject it claims.
    async fn authenticate(&self, token: &str) -> Result<VerifiedToken, TokensServiceError>;

    /// Returns the user's externally issued git credential.
    async fn git_token(&self, login: &str) -> Result<String, TokensServiceError>;
}
