//! Verify Token Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use backstage_app::auth::VerifiedToken;

use crate::{errors::tokens_status_error, extensions::*};

/// Verify Token Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyTokenRequest {
    pub token: String,
}

/// Verified token claims
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyTokenResponse {
    /// Token kind (`sess` or `hook`)
    pub kind: String,

    /// Login or `owner/name` the token is scoped to
    pub subject: String,

    /// Expiry instant; absent for tokens that never expire
    pub expires_at: Option<String>,
}

impl From<VerifiedToken> for VerifyTokenResponse {
    fn from(token: VerifiedToken) -> Self {
        VerifyTokenResponse {
            kind: token.kind.to_string(),
            subject: token.subject,
            expires_at: token.expires_at.map(|at| at.to_string()),
        }
    }
}

/// Verify Token Handler
///
/// Verifies a token against the current secret of the subject it names.
#[endpoint(
    tags("tokens"),
    summary = "Verify Token",
    responses(
        (status_code = StatusCode::OK, description = "Token is valid"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Token is malformed, forged or expired"),
        (status_code = StatusCode::NOT_FOUND, description = "Token subject no longer exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyTokenRequest>,
    depot: &mut Depot,
) -> Result<Json<VerifyTokenResponse>, StatusError> {
    let state = depot.backstage_state()?;

    let verified = state
        .app
        .tokens
        .authenticate(&json.into_inner().token)
        .await
        .map_err(tokens_status_error)?;

    Ok(Json(verified.into()))
}
