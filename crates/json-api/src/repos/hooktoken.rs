//! Issue Hook Token Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{errors::tokens_status_error, extensions::*, repos::repo_ref};

/// Hook token issued for a repository
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HookTokenResponse {
    /// The repository the token is scoped to (`owner/name`)
    pub repo: String,

    /// The signed hook token
    pub token: String,
}

/// Issue Hook Token Handler
///
/// Returns a non-expiring hook token signed with the repository's current
/// secret.
#[endpoint(
    tags("repos"),
    summary = "Issue Hook Token",
    responses(
        (status_code = StatusCode::OK, description = "Hook token issued"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown repository"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: PathParam<String>,
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<HookTokenResponse>, StatusError> {
    let state = depot.backstage_state()?;
    let repo = repo_ref(owner.into_inner(), name.into_inner())?;

    let issued = state
        .app
        .tokens
        .issue_hook_token(&repo.owner, &repo.name)
        .await
        .map_err(tokens_status_error)?;

    Ok(Json(HookTokenResponse {
        repo: issued.subject,
        token: issued.token,
    }))
}
