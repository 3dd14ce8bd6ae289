//! Signed capability tokens: claim encoding, signing and verification.
//!
//! Wire format: `{claims}.{signature}` where `claims` is the URL-safe,
//! unpadded base64 of a JSON claim set and `signature` is the URL-safe,
//! unpadded base64 of an HMAC-SHA256 over the encoded `claims` segment. The
//! signature therefore covers kind, subject and expiry together.

use std::{fmt, str::FromStr, sync::Arc};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL};
use hmac::{Hmac, Mac};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::{
    auth::clock::{Clock, SystemClock},
    domain::repos::RepoRef,
    errors::ErrorKind,
};

type HmacSha256 = Hmac<Sha256>;

/// Separator between the claims and signature segments.
pub const TOKEN_SEGMENT_SEPARATOR: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Scoped to a user login; expires.
    #[serde(rename = "sess")]
    Session,

    /// Scoped to an `owner/name` repository; never expires.
    #[serde(rename = "hook")]
    Hook,
}

impl TokenKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "sess",
            Self::Hook => "hook",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sess" => Ok(Self::Session),
            "hook" => Ok(Self::Hook),
            _ => Err(TokenError::Malformed),
        }
    }
}

/// The entity a token is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSubject {
    Session { login: String },
    Hook { repo: RepoRef },
}

impl TokenSubject {
    /// Rebuilds a subject from a kind and its textual subject.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] when the subject text does not fit
    /// the kind.
    pub fn from_parts(kind: TokenKind, subject: &str) -> Result<Self, TokenError> {
        match kind {
            TokenKind::Session if !subject.is_empty() => Ok(Self::Session {
                login: subject.to_string(),
            }),
            TokenKind::Session => Err(TokenError::Malformed),
            TokenKind::Hook => RepoRef::parse(subject)
                .map(|repo| Self::Hook { repo })
                .map_err(|_ignored| TokenError::Malformed),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Session { .. } => TokenKind::Session,
            Self::Hook { .. } => TokenKind::Hook,
        }
    }

    /// Login for session tokens, `owner/name` for hook tokens.
    #[must_use]
    pub fn subject(&self) -> String {
        match self {
            Self::Session { login } => login.clone(),
            Self::Hook { repo } => repo.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("signing secret is unusable")]
    InvalidSecret,

    #[error("token lifetime is out of range")]
    InvalidTtl,

    #[error("token claims could not be encoded")]
    Encode,
}

impl TokenError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed | Self::InvalidSignature | Self::Expired => ErrorKind::InvalidToken,
            Self::InvalidSecret | Self::InvalidTtl | Self::Encode => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Claims {
    kind: TokenKind,
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Claims of a token whose signature has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub kind: TokenKind,
    pub subject: String,
    pub expires_at: Option<Timestamp>,
}

/// Claims read from a token without checking its signature.
///
/// Only fit for deciding which secret to verify the token with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedClaims {
    pub kind: TokenKind,
    pub subject: String,
}

/// Issues and verifies signed tokens.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    clock: Arc<dyn Clock>,
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl TokenCodec {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Mints a token for `subject`, expiring after `ttl` when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty or the expiry overflows.
    pub fn issue(
        &self,
        kind: TokenKind,
        subject: &str,
        secret: &[u8],
        ttl: Option<SignedDuration>,
    ) -> Result<String, TokenError> {
        let exp = ttl
            .map(|ttl| {
                self.clock
                    .now()
                    .checked_add(ttl)
                    .map(Timestamp::as_second)
                    .map_err(|_ignored| TokenError::InvalidTtl)
            })
            .transpose()?;

        let claims = Claims {
            kind,
            sub: subject.to_string(),
            exp,
        };

        let json = serde_json::to_vec(&claims).map_err(|_ignored| TokenError::Encode)?;
        let payload = BASE64URL.encode(json);

        let signature = signer(secret)?
            .chain_update(payload.as_bytes())
            .finalize()
            .into_bytes();

        Ok(format!(
            "{payload}{TOKEN_SEGMENT_SEPARATOR}{}",
            BASE64URL.encode(signature)
        ))
    }

    /// Checks the token's signature against `secret` and its expiry against
    /// the clock.
    ///
    /// # Errors
    ///
    /// [`TokenError::Malformed`] if the token cannot be split or decoded,
    /// [`TokenError::InvalidSignature`] if the signature does not match and
    /// [`TokenError::Expired`] once the expiry has passed.
    pub fn verify(&self, token: &str, secret: &[u8]) -> Result<VerifiedToken, TokenError> {
        let (payload, signature) = split_token(token)?;

        let signature = BASE64URL
            .decode(signature)
            .map_err(|_ignored| TokenError::Malformed)?;

        signer(secret)?
            .chain_update(payload.as_bytes())
            .verify_slice(&signature)
            .map_err(|_ignored| TokenError::InvalidSignature)?;

        let claims = decode_claims(payload)?;

        if let Some(exp) = claims.exp
            && self.clock.now().as_second() > exp
        {
            return Err(TokenError::Expired);
        }

        let expires_at = claims
            .exp
            .map(Timestamp::from_second)
            .transpose()
            .map_err(|_ignored| TokenError::Malformed)?;

        Ok(VerifiedToken {
            kind: claims.kind,
            subject: claims.sub,
            expires_at,
        })
    }

    /// Reads the claimed kind and subject without verifying anything.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`] if the claims cannot be decoded.
    pub fn peek(&self, token: &str) -> Result<UnverifiedClaims, TokenError> {
        let (payload, _signature) = split_token(token)?;
        let claims = decode_claims(payload)?;

        Ok(UnverifiedClaims {
            kind: claims.kind,
            subject: claims.sub,
        })
    }
}

fn signer(secret: &[u8]) -> Result<HmacSha256, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    HmacSha256::new_from_slice(secret).map_err(|_ignored| TokenError::InvalidSecret)
}

fn split_token(token: &str) -> Result<(&str, &str), TokenError> {
    let (payload, signature) = token
        .split_once(TOKEN_SEGMENT_SEPARATOR)
        .ok_or(TokenError::Malformed)?;

    if payload.is_empty() || signature.is_empty() || signature.contains(TOKEN_SEGMENT_SEPARATOR)
    {
        return Err(TokenError::Malformed);
    }

    Ok((payload, signature))
}

fn decode_claims(payload: &str) -> Result<Claims, TokenError> {
    let json = BASE64URL
        .decode(payload)
        .map_err(|_ignored| TokenError::Malformed)?;

    serde_json::from_slice(&json).map_err(|_ignored| TokenError::Malformed)
}
